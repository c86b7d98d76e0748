use async_trait::async_trait;
use jiff::Timestamp;
use qrlink_core::{
    LinkRecord, LinkStats, LinkStore, LinkTable, QrEncoder, ShortCode, ShortenedLink, Shortener,
    ShortenerError,
};
use qrlink_generator::Generator;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, trace, warn};

/// How many fresh codes to draw before giving up on finding an unused one.
pub const MAX_GENERATION_ATTEMPTS: usize = 8;

/// Targets end up in a `Location` header, which cannot carry control characters.
fn is_redirectable(url: &str) -> bool {
    !url.chars().any(|c| c.is_ascii_control())
}

/// A concrete implementation of the [`Shortener`] trait.
///
/// Every operation loads the whole table from the store, mutates at most one
/// record and saves the whole table back. A single async mutex is held across
/// each load-mutate-save cycle so that concurrent requests in this process
/// cannot lose each other's writes. Stats only reads and does not take it.
pub struct ShortenerService<S, G, E> {
    store: Arc<S>,
    generator: Arc<G>,
    encoder: Arc<E>,
    base_url: String,
    write_lock: Mutex<()>,
}

impl<S: LinkStore, G: Generator, E: QrEncoder> ShortenerService<S, G, E> {
    /// Creates a service publishing short URLs under `base_url`.
    pub fn new(store: S, generator: G, encoder: E, base_url: impl Into<String>) -> Self {
        Self::from_shared(Arc::new(store), generator, encoder, base_url)
    }

    /// Like [`new`](Self::new), sharing the store with the caller.
    pub fn from_shared(
        store: Arc<S>,
        generator: G,
        encoder: E,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            store,
            generator: Arc::new(generator),
            encoder: Arc::new(encoder),
            base_url: base_url.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Checks a target URL and returns it with surrounding whitespace removed.
    fn validate_url(url: &str) -> Result<&str, ShortenerError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(ShortenerError::InvalidUrl(
                "URL cannot be empty".to_string(),
            ));
        }

        if !is_redirectable(url) {
            return Err(ShortenerError::InvalidUrl(format!(
                "URL must not contain control characters: {:?}",
                url
            )));
        }

        Ok(url)
    }

    /// Draws codes until one is not in `table`.
    fn unused_code(&self, table: &LinkTable) -> Result<ShortCode, ShortenerError> {
        for attempt in 1..=MAX_GENERATION_ATTEMPTS {
            let code: ShortCode = self.generator.generate().into();
            if !table.contains(&code) {
                return Ok(code);
            }
            debug!(code = %code, attempt, "generated short code already exists, retrying");
        }
        Err(ShortenerError::CodeSpaceExhausted(MAX_GENERATION_ATTEMPTS))
    }
}

#[async_trait]
impl<S: LinkStore, G: Generator, E: QrEncoder> Shortener for ShortenerService<S, G, E> {
    async fn shorten(&self, target_url: String) -> Result<ShortenedLink, ShortenerError> {
        let target_url = Self::validate_url(&target_url)?;

        let _guard = self.write_lock.lock().await;
        let mut table = self.store.load().await?;

        let code = self.unused_code(&table)?;
        let short_url = code.to_url(&self.base_url);

        // render before persisting so an encoder failure leaves no orphan record
        let qr = self.encoder.encode(&short_url)?;

        table.insert(code.clone(), LinkRecord::new(target_url, Timestamp::now()));
        self.store.save(&table).await?;

        info!(code = %code, target_url = %target_url, short_url = %short_url, "created short url");
        Ok(ShortenedLink {
            code,
            short_url,
            qr,
        })
    }

    async fn visit(&self, code: &ShortCode) -> Result<String, ShortenerError> {
        let _guard = self.write_lock.lock().await;
        let mut table = self.store.load().await?;

        let Some(record) = table.get_mut(code) else {
            trace!(code = %code, "short code not found");
            return Err(ShortenerError::NotFound(code.to_string()));
        };
        // older data files may hold targets that were never validated
        if !is_redirectable(&record.target_url) {
            warn!(code = %code, target_url = ?record.target_url, "stored target url cannot be used for a redirect");
            return Err(ShortenerError::UnusableTarget(code.to_string()));
        }
        record.record_visit(Timestamp::now());
        let target_url = record.target_url.clone();
        let clicks = record.clicks;

        self.store.save(&table).await?;

        debug!(code = %code, target_url = %target_url, clicks, "resolved short code");
        Ok(target_url)
    }

    async fn retarget(&self, code: &ShortCode, new_url: String) -> Result<String, ShortenerError> {
        let new_url = Self::validate_url(&new_url)?;

        let _guard = self.write_lock.lock().await;
        let mut table = self.store.load().await?;

        let Some(record) = table.get_mut(code) else {
            debug!(code = %code, "cannot update unknown short code");
            return Err(ShortenerError::NotFound(code.to_string()));
        };
        record.retarget(new_url, Timestamp::now());

        self.store.save(&table).await?;

        info!(code = %code, target_url = %new_url, "updated target url");
        Ok(new_url.to_string())
    }

    async fn stats(&self, code: &ShortCode) -> Result<LinkStats, ShortenerError> {
        self.store
            .load()
            .await?
            .stats(code)
            .ok_or_else(|| ShortenerError::NotFound(code.to_string()))
    }
}
