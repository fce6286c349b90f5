use ferrous_doh_domain::ClientSubnet;

const DNS_HEADER_LEN: usize = 12;
const ARCOUNT_OFFSET: usize = 10;
const OPT_RECORD_TYPE: u16 = 41;
const EDNS_UDP_PAYLOAD: u16 = 4096;
const ECS_OPTION_CODE: u16 = 8;

/// Appends an EDNS0 OPT record carrying an EDNS-Client-Subnet option
/// (RFC 7871) to a serialized query and bumps ARCOUNT.
///
/// The message must not already carry additional records.
pub fn append_client_subnet(message: &mut Vec<u8>, subnet: &ClientSubnet) {
    if message.len() < DNS_HEADER_LEN {
        return;
    }

    let address = subnet.address_octets();
    // family(2) + source prefix(1) + scope prefix(1) + address
    let option_len = 4 + address.len() as u16;
    let rdata_len = 4 + option_len;

    message.reserve(11 + rdata_len as usize);
    message.push(0x00); // root owner name
    message.extend_from_slice(&OPT_RECORD_TYPE.to_be_bytes());
    message.extend_from_slice(&EDNS_UDP_PAYLOAD.to_be_bytes());
    message.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]); // ext rcode, version, flags
    message.extend_from_slice(&rdata_len.to_be_bytes());

    message.extend_from_slice(&ECS_OPTION_CODE.to_be_bytes());
    message.extend_from_slice(&option_len.to_be_bytes());
    message.extend_from_slice(&subnet.family().to_be_bytes());
    message.push(subnet.source_prefix());
    message.push(0x00);
    message.extend_from_slice(&address);

    let arcount = u16::from_be_bytes([message[ARCOUNT_OFFSET], message[ARCOUNT_OFFSET + 1]]);
    message[ARCOUNT_OFFSET..ARCOUNT_OFFSET + 2]
        .copy_from_slice(&arcount.saturating_add(1).to_be_bytes());
}
