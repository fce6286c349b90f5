use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    A,
    NS,
    CNAME,
    SOA,
    NULL,
    WKS,
    PTR,
    HINFO,
    MX,
    TXT,
    AAAA,
    SRV,
    NAPTR,
    DNAME,
    OPT,
    DS,
    SSHFP,
    IPSECKEY,
    RRSIG,
    NSEC,
    DNSKEY,
    NSEC3,
    NSEC3PARAM,
    TLSA,
    CDS,
    CDNSKEY,
    OPENPGPKEY,
    ZONEMD,
    SVCB,
    HTTPS,
    ANY,
    CAA,
}

/// (type, IANA code, mnemonic). Single source for both directions of lookup.
const KNOWN_TYPES: &[(RecordType, u16, &str)] = &[
    (RecordType::A, 1, "A"),
    (RecordType::NS, 2, "NS"),
    (RecordType::CNAME, 5, "CNAME"),
    (RecordType::SOA, 6, "SOA"),
    (RecordType::NULL, 10, "NULL"),
    (RecordType::WKS, 11, "WKS"),
    (RecordType::PTR, 12, "PTR"),
    (RecordType::HINFO, 13, "HINFO"),
    (RecordType::MX, 15, "MX"),
    (RecordType::TXT, 16, "TXT"),
    (RecordType::AAAA, 28, "AAAA"),
    (RecordType::SRV, 33, "SRV"),
    (RecordType::NAPTR, 35, "NAPTR"),
    (RecordType::DNAME, 39, "DNAME"),
    (RecordType::OPT, 41, "OPT"),
    (RecordType::DS, 43, "DS"),
    (RecordType::SSHFP, 44, "SSHFP"),
    (RecordType::IPSECKEY, 45, "IPSECKEY"),
    (RecordType::RRSIG, 46, "RRSIG"),
    (RecordType::NSEC, 47, "NSEC"),
    (RecordType::DNSKEY, 48, "DNSKEY"),
    (RecordType::NSEC3, 50, "NSEC3"),
    (RecordType::NSEC3PARAM, 51, "NSEC3PARAM"),
    (RecordType::TLSA, 52, "TLSA"),
    (RecordType::CDS, 59, "CDS"),
    (RecordType::CDNSKEY, 60, "CDNSKEY"),
    (RecordType::OPENPGPKEY, 61, "OPENPGPKEY"),
    (RecordType::ZONEMD, 63, "ZONEMD"),
    (RecordType::SVCB, 64, "SVCB"),
    (RecordType::HTTPS, 65, "HTTPS"),
    (RecordType::ANY, 255, "ANY"),
    (RecordType::CAA, 257, "CAA"),
];

impl RecordType {
    pub fn as_str(&self) -> &'static str {
        KNOWN_TYPES
            .iter()
            .find(|(t, _, _)| t == self)
            .map(|(_, _, name)| *name)
            .unwrap_or("UNKNOWN")
    }

    pub fn to_u16(&self) -> u16 {
        KNOWN_TYPES
            .iter()
            .find(|(t, _, _)| t == self)
            .map(|(_, code, _)| *code)
            .unwrap_or(0)
    }

    pub fn from_u16(code: u16) -> Option<Self> {
        KNOWN_TYPES
            .iter()
            .find(|(_, c, _)| *c == code)
            .map(|(t, _, _)| *t)
    }

    /// Mnemonic for a numeric type code, `TYPE<n>` (RFC 3597) when unknown.
    pub fn label_for_code(code: u16) -> String {
        match Self::from_u16(code) {
            Some(t) => t.as_str().to_string(),
            None => format!("TYPE{}", code),
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();

        if let Some((t, _, _)) = KNOWN_TYPES.iter().find(|(_, _, name)| *name == upper) {
            return Ok(*t);
        }

        // Generic form accepted by dig and friends, limited to codes we know.
        let generic = upper.strip_prefix("TYPE");
        if let Some(code) = generic.and_then(|n| n.parse::<u16>().ok()) {
            if let Some(t) = Self::from_u16(code) {
                return Ok(t);
            }
        }

        Err(format!("Unknown record type: {}", s))
    }
}
