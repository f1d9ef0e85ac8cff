use std::fmt;
use std::str::FromStr;

/// Record types accepted by the JSON resolution API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(clippy::upper_case_acronyms)]
pub enum RecordType {
    A,
    AAAA,
    DNSKEY,
    MX,
    NS,
    SRV,
    TXT,
}

impl RecordType {
    pub const SUPPORTED: [RecordType; 7] = [
        RecordType::A,
        RecordType::AAAA,
        RecordType::DNSKEY,
        RecordType::MX,
        RecordType::NS,
        RecordType::SRV,
        RecordType::TXT,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::AAAA => "AAAA",
            Self::DNSKEY => "DNSKEY",
            Self::MX => "MX",
            Self::NS => "NS",
            Self::SRV => "SRV",
            Self::TXT => "TXT",
        }
    }

    /// IANA type code.
    pub fn code(&self) -> u16 {
        match self {
            Self::A => 1,
            Self::NS => 2,
            Self::MX => 15,
            Self::TXT => 16,
            Self::AAAA => 28,
            Self::SRV => 33,
            Self::DNSKEY => 48,
        }
    }

    pub fn supported_names() -> Vec<&'static str> {
        Self::SUPPORTED.iter().map(|t| t.as_str()).collect()
    }
}

impl Default for RecordType {
    fn default() -> Self {
        Self::A
    }
}

impl FromStr for RecordType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Self::SUPPORTED
            .iter()
            .copied()
            .find(|t| t.as_str() == upper)
            .ok_or_else(|| format!("Unsupported record type: {}", s))
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
