use typed_builder::TypedBuilder;

/// QR error-correction level, from lowest to highest redundancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EcLevel {
    /// Recovers about 7% of damaged modules.
    L,
    /// About 15%.
    M,
    /// About 25%.
    Q,
    /// About 30%.
    #[default]
    H,
}

impl From<EcLevel> for qrcode::EcLevel {
    fn from(level: EcLevel) -> Self {
        match level {
            EcLevel::L => qrcode::EcLevel::L,
            EcLevel::M => qrcode::EcLevel::M,
            EcLevel::Q => qrcode::EcLevel::Q,
            EcLevel::H => qrcode::EcLevel::H,
        }
    }
}

/// Configures how QR images are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TypedBuilder)]
pub struct QrSettings {
    #[builder(default)]
    pub ec_level: EcLevel,
    /// Side length of the square image in pixels.
    ///
    /// Raised to one pixel per module when the code would not fit.
    #[builder(default = 300)]
    pub width: u32,
    /// Light border around the code, in modules.
    #[builder(default = 2)]
    pub margin: u32,
}

impl Default for QrSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}
