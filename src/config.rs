//! # Configuration
//!
//! Closed enumerations describing one deployment of the envelope construction, plus
//! [`EnvelopeConfig`], a serde-friendly form that can be loaded from a settings file and
//! validated into an [`EnvelopeBuilder`](crate::EnvelopeBuilder).
//!
//! None of these types carry primitive-library identifiers. The backends resolve
//! `(AesVariant, Mode)` to concrete RustCrypto types at the point of use.

use crate::error::AesEnvelopeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// AES key size. Selected by its size in bits (`128`/`192`/`256`) or by name
/// (`aes128`/`aes192`/`aes256`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum AesVariant {
    Aes128,
    Aes192,
    Aes256,
}

impl AesVariant {
    pub const ALL: [AesVariant; 3] = [Self::Aes128, Self::Aes192, Self::Aes256];

    /// Resolve a size in bits.
    pub fn from_bits(bits: u16) -> Result<Self, AesEnvelopeError> {
        match bits {
            128 => Ok(Self::Aes128),
            192 => Ok(Self::Aes192),
            256 => Ok(Self::Aes256),
            other => Err(AesEnvelopeError::InvalidCipherConfiguration(format!(
                "block size of \"{other}\" is not valid"
            ))),
        }
    }

    #[must_use]
    pub const fn bits(self) -> u16 {
        match self {
            Self::Aes128 => 128,
            Self::Aes192 => 192,
            Self::Aes256 => 256,
        }
    }

    /// Cipher key length in bytes.
    #[must_use]
    pub const fn key_len(self) -> usize {
        self.bits() as usize / 8
    }
}

impl TryFrom<u16> for AesVariant {
    type Error = AesEnvelopeError;

    fn try_from(bits: u16) -> Result<Self, Self::Error> {
        Self::from_bits(bits)
    }
}

impl From<AesVariant> for u16 {
    fn from(variant: AesVariant) -> Self {
        variant.bits()
    }
}

impl FromStr for AesVariant {
    type Err = AesEnvelopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let digits = lower.strip_prefix("aes").unwrap_or(&lower);
        let digits = digits.strip_prefix('-').unwrap_or(digits);
        match digits.parse::<u16>() {
            Ok(bits) => Self::from_bits(bits),
            Err(_) => Err(AesEnvelopeError::InvalidCipherConfiguration(format!(
                "method \"{s}\" is not a valid AES method"
            ))),
        }
    }
}

impl fmt::Display for AesVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "aes{}", self.bits())
    }
}

/// Block-cipher mode of operation.
///
/// `Cfb` and `Ofb` are the full-block (128-bit feedback) forms; `Cfb8` is the 8-bit
/// feedback form. The name `nofb` parses to [`Mode::Ofb`], which is the full-block
/// output feedback it denotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Mode {
    Cbc,
    Cfb,
    Cfb8,
    Ecb,
    Ofb,
}

impl Mode {
    pub const ALL: [Mode; 5] = [Self::Cbc, Self::Cfb, Self::Cfb8, Self::Ecb, Self::Ofb];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Cbc => "cbc",
            Self::Cfb => "cfb",
            Self::Cfb8 => "cfb8",
            Self::Ecb => "ecb",
            Self::Ofb => "ofb",
        }
    }

    /// IV length this mode requires. ECB takes none.
    #[must_use]
    pub const fn iv_len(self) -> usize {
        match self {
            Self::Ecb => 0,
            _ => crate::consts::AES_BLOCK_LEN,
        }
    }

    /// Block modes pad to a multiple of the block length; feedback modes are
    /// length-preserving.
    #[must_use]
    pub const fn is_padded(self) -> bool {
        matches!(self, Self::Cbc | Self::Ecb)
    }
}

impl FromStr for Mode {
    type Err = AesEnvelopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cbc" => Ok(Self::Cbc),
            "cfb" | "cfb128" => Ok(Self::Cfb),
            "cfb8" => Ok(Self::Cfb8),
            "ecb" => Ok(Self::Ecb),
            "ofb" | "nofb" => Ok(Self::Ofb),
            _ => Err(AesEnvelopeError::InvalidCipherConfiguration(format!(
                "mode \"{s}\" is not a valid mode"
            ))),
        }
    }
}

impl TryFrom<String> for Mode {
    type Error = AesEnvelopeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Mode> for String {
    fn from(mode: Mode) -> Self {
        mode.name().to_string()
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An `(AesVariant, Mode)` pair, fixed for the lifetime of an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CipherConfig {
    pub variant: AesVariant,
    pub mode: Mode,
}

impl CipherConfig {
    #[must_use]
    pub const fn new(variant: AesVariant, mode: Mode) -> Self {
        Self { variant, mode }
    }

    /// Validate a raw `(bits, mode name)` pair.
    pub fn parse(bits: u16, mode: &str) -> Result<Self, AesEnvelopeError> {
        Ok(Self::new(AesVariant::from_bits(bits)?, mode.parse()?))
    }

    /// OpenSSL-style cipher name, e.g. `aes-256-cbc`.
    #[must_use]
    pub fn openssl_name(&self) -> String {
        format!("aes-{}-{}", self.variant.bits(), self.mode.name())
    }

    #[must_use]
    pub const fn iv_len(&self) -> usize {
        self.mode.iv_len()
    }

    /// Every supported configuration, in a stable order.
    pub fn all() -> impl Iterator<Item = CipherConfig> {
        AesVariant::ALL
            .into_iter()
            .flat_map(|v| Mode::ALL.into_iter().map(move |m| CipherConfig::new(v, m)))
    }
}

impl Default for CipherConfig {
    fn default() -> Self {
        Self::new(AesVariant::Aes256, Mode::Cbc)
    }
}

impl fmt::Display for CipherConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.openssl_name())
    }
}

/// Order in which encryption and authentication are combined.
///
/// The two compositions produce incompatible envelopes (three fields vs two).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Composition {
    /// `base64(ct)|base64(HMAC(iv ‖ ct))|base64(iv)`. Forgeries are rejected before
    /// any decryption.
    #[default]
    EncryptThenMac,
    /// `base64(Encrypt(pt ‖ HMAC(pt)))|base64(iv)`.
    MacThenEncrypt,
}

impl Composition {
    /// Number of `|`-separated fields in an envelope.
    #[must_use]
    pub const fn arity(self) -> usize {
        match self {
            Self::EncryptThenMac => crate::consts::ENCRYPT_THEN_MAC_FIELDS,
            Self::MacThenEncrypt => crate::consts::MAC_THEN_ENCRYPT_FIELDS,
        }
    }
}

/// How the secret becomes cipher key material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KeyScheme {
    /// Leading N bytes of SHA-256(secret). Accepts any secret.
    #[default]
    Sha256Truncated,
    /// Secret is 64 hex characters, packed to 32 bytes with no hashing.
    RawHex,
}

/// How the MAC key relates to the cipher key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MacKeyScheme {
    /// The cipher key doubles as the HMAC key.
    #[default]
    CipherKey,
    /// The 16 bytes named by the last 32 hex characters of the hex-encoded cipher key.
    HexTail,
}

/// Which [`CipherBackend`](crate::backend::CipherBackend) implementation runs the
/// primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendChoice {
    /// RustCrypto mode crates (`cbc`, `ecb`, `cfb-mode`, `cfb8`, `ofb`).
    #[default]
    Modern,
    /// Modes chained by hand over the raw `aes` block primitive.
    Legacy,
}

/// Deserializable deployment settings.
///
/// ```
/// use aesenvelope_rs::EnvelopeConfig;
///
/// let cfg: EnvelopeConfig = serde_json::from_str(
///     r#"{ "block_size": 128, "mode": "cfb", "composition": "mac-then-encrypt" }"#,
/// )?;
/// let cipher = cfg.cipher_config()?;
/// assert_eq!(cipher.openssl_name(), "aes-128-cfb");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnvelopeConfig {
    /// AES size in bits. Kept raw so invalid values surface as
    /// [`AesEnvelopeError::InvalidCipherConfiguration`] rather than a parse error.
    pub block_size: u16,
    pub mode: String,
    pub composition: Composition,
    pub key_scheme: KeyScheme,
    pub mac_key: MacKeyScheme,
    pub backend: BackendChoice,
}

impl EnvelopeConfig {
    /// Validate the raw cipher fields.
    pub fn cipher_config(&self) -> Result<CipherConfig, AesEnvelopeError> {
        CipherConfig::parse(self.block_size, &self.mode)
    }
}

impl Default for EnvelopeConfig {
    fn default() -> Self {
        let cipher = CipherConfig::default();
        Self {
            block_size: cipher.variant.bits(),
            mode: cipher.mode.name().to_string(),
            composition: Composition::default(),
            key_scheme: KeyScheme::default(),
            mac_key: MacKeyScheme::default(),
            backend: BackendChoice::default(),
        }
    }
}
