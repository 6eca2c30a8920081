//! Bit-vector IPv4 addresses
//!
//! An [`Address`] is a fixed 32-bit vector, most significant bit first,
//! grouped into four 8-bit octets. Arithmetic is done bit by bit with an
//! explicit ripple carry rather than through native integer addition.

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::net::Ipv4Addr;
use std::str::FromStr;
use thiserror::Error;

/// Number of octets in an address
pub const NUM_OCTETS: usize = 4;
/// Bits per octet
pub const OCTET_BITS: usize = 8;
/// Bits per address
pub const ADDRESS_BITS: usize = NUM_OCTETS * OCTET_BITS;

/// Longest accepted decimal octet literal ("255")
const MAX_DECIMAL_DIGITS: usize = 3;

/// Textual rendering of an address
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressFormat {
    /// Dotted decimal, e.g. `192.168.1.0`
    #[default]
    Decimal,
    /// Dotted binary, e.g. `11000000.10101000.00000001.00000000`
    Binary,
}

/// Reasons an address text is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressParseError {
    #[error("expected 4 octets, found {0}")]
    WrongOctetCount(usize),

    #[error("cannot tell decimal from binary octet '{0}'")]
    AmbiguousFormat(String),

    #[error("decimal octet '{0}' is not a number between 0 and 255")]
    DecimalOctet(String),

    #[error("binary octet '{0}' must be exactly 8 characters of '0' or '1'")]
    BinaryOctet(String),
}

/// A 32-bit IPv4 address stored as an explicit bit vector
///
/// The output format travels with the value but is not part of its identity:
/// two addresses with the same bits compare equal regardless of format.
#[derive(Debug, Clone, Copy)]
pub struct Address {
    bits: [bool; ADDRESS_BITS],
    format: AddressFormat,
}

impl Address {
    /// Build an address from raw bits, most significant first
    pub fn from_bits(bits: [bool; ADDRESS_BITS]) -> Self {
        Self {
            bits,
            format: AddressFormat::default(),
        }
    }

    /// A mask with `prefix_len` leading ones followed by zeros
    ///
    /// Prefix lengths above 32 saturate to an all-ones mask.
    pub fn mask(prefix_len: u8) -> Self {
        let mut bits = [false; ADDRESS_BITS];
        for bit in bits.iter_mut().take(prefix_len as usize) {
            *bit = true;
        }
        Self::from_bits(bits)
    }

    /// Parse dotted-decimal or dotted-binary text
    ///
    /// The length of the first octet picks the format for the whole address:
    /// 8 characters means binary, 1 to 3 characters means decimal.
    pub fn parse(text: &str) -> Result<Self, AddressParseError> {
        let parts: Vec<&str> = text.trim().split('.').collect();
        if parts.len() != NUM_OCTETS {
            return Err(AddressParseError::WrongOctetCount(parts.len()));
        }

        let first_len = parts[0].len();
        let octets: Vec<String> = if first_len == OCTET_BITS {
            parts
                .iter()
                .map(|part| parse_binary_octet(part))
                .collect::<Result<_, _>>()?
        } else if (1..=MAX_DECIMAL_DIGITS).contains(&first_len) {
            parts
                .iter()
                .map(|part| parse_decimal_octet(part))
                .collect::<Result<_, _>>()?
        } else {
            return Err(AddressParseError::AmbiguousFormat(parts[0].to_string()));
        };

        let mut bits = [false; ADDRESS_BITS];
        for (i, octet) in octets.iter().enumerate() {
            // Right-align shorter decimal-derived strings in their 8-bit field
            let offset = OCTET_BITS - octet.len();
            for (j, c) in octet.chars().enumerate() {
                bits[OCTET_BITS * i + offset + j] = c == '1';
            }
        }

        Ok(Self::from_bits(bits))
    }

    /// Add an offset bit pattern with ripple carry
    ///
    /// The offset is right-aligned against the low-order end of the address;
    /// only its low 32 bits take part. A carry out of the top bit is dropped,
    /// so the sum wraps like fixed-width unsigned arithmetic.
    pub fn add(&self, offset_bits: &[bool]) -> Self {
        let mut offset = [false; ADDRESS_BITS];
        let skip = offset_bits.len().saturating_sub(ADDRESS_BITS);
        let aligned = &offset_bits[skip..];
        offset[ADDRESS_BITS - aligned.len()..].copy_from_slice(aligned);

        let mut result = [false; ADDRESS_BITS];
        let mut carry = false;
        for i in (0..ADDRESS_BITS).rev() {
            let (a, b) = (self.bits[i], offset[i]);
            result[i] = a ^ b ^ carry;
            carry = (a && b) || (carry && (a ^ b));
        }

        Self {
            bits: result,
            format: self.format,
        }
    }

    /// Count of leading set bits, stopping at the first zero
    pub fn leading_ones(&self) -> u8 {
        self.bits.iter().take_while(|&&bit| bit).count() as u8
    }

    /// Output format carried by this value
    pub fn format(&self) -> AddressFormat {
        self.format
    }

    /// Copy of this address rendered with a different format
    pub fn with_format(mut self, format: AddressFormat) -> Self {
        self.format = format;
        self
    }

    /// Octet values, first octet first
    pub fn octets(&self) -> [u8; NUM_OCTETS] {
        let mut octets = [0u8; NUM_OCTETS];
        for (octet, chunk) in octets.iter_mut().zip(self.bits.chunks(OCTET_BITS)) {
            *octet = chunk.iter().fold(0u8, |acc, &bit| (acc << 1) | u8::from(bit));
        }
        octets
    }

    /// Render the address in the given format
    pub fn render(&self, format: AddressFormat) -> String {
        match format {
            AddressFormat::Decimal => self
                .octets()
                .iter()
                .map(u8::to_string)
                .collect::<Vec<_>>()
                .join("."),
            AddressFormat::Binary => self
                .bits
                .chunks(OCTET_BITS)
                .map(|chunk| chunk.iter().map(|&bit| if bit { '1' } else { '0' }).collect())
                .collect::<Vec<String>>()
                .join("."),
        }
    }

    /// Convert to a standard library address
    pub fn to_ipv4(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.octets())
    }
}

/// Minimal most-significant-first bit pattern of a value
///
/// Zero yields a single `false` bit.
pub fn bits_of(value: u64) -> Vec<bool> {
    if value == 0 {
        return vec![false];
    }
    let width = u64::BITS - value.leading_zeros();
    (0..width).rev().map(|i| (value >> i) & 1 == 1).collect()
}

fn parse_decimal_octet(part: &str) -> Result<String, AddressParseError> {
    let invalid = || AddressParseError::DecimalOctet(part.to_string());

    if part.is_empty()
        || part.len() > MAX_DECIMAL_DIGITS
        || !part.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(invalid());
    }

    let value: u16 = part.parse().map_err(|_| invalid())?;
    if value > u16::from(u8::MAX) {
        return Err(invalid());
    }

    Ok(format!("{:b}", value))
}

fn parse_binary_octet(part: &str) -> Result<String, AddressParseError> {
    if part.len() != OCTET_BITS || !part.chars().all(|c| c == '0' || c == '1') {
        return Err(AddressParseError::BinaryOctet(part.to_string()));
    }
    Ok(part.to_string())
}

impl PartialEq for Address {
    fn eq(&self, other: &Self) -> bool {
        self.bits == other.bits
    }
}

impl Eq for Address {}

impl Hash for Address {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bits.hash(state);
    }
}

/// The all-zero address
impl Default for Address {
    fn default() -> Self {
        Self::from_bits([false; ADDRESS_BITS])
    }
}

impl FromStr for Address {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Ipv4Addr> for Address {
    fn from(ip: Ipv4Addr) -> Self {
        let mut bits = [false; ADDRESS_BITS];
        for (i, octet) in ip.octets().iter().enumerate() {
            for j in 0..OCTET_BITS {
                bits[OCTET_BITS * i + j] = (octet >> (OCTET_BITS - 1 - j)) & 1 == 1;
            }
        }
        Self::from_bits(bits)
    }
}

impl From<Address> for Ipv4Addr {
    fn from(address: Address) -> Self {
        address.to_ipv4()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(self.format))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}
