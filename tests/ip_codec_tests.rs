//! 地址编解码测试

use iplocate::utils::{AddressParseError, decode_ipv4, encode_ipv4};

#[test]
fn test_reference_values() {
    assert_eq!(encode_ipv4("0.0.0.0").unwrap(), 0);
    assert_eq!(encode_ipv4("255.255.255.255").unwrap(), 4_294_967_295);
    assert_eq!(encode_ipv4("8.8.8.8").unwrap(), 134_744_072);
    assert_eq!(encode_ipv4("1.0.0.0").unwrap(), 16_777_216);
}

#[test]
fn test_octet_above_255_is_rejected() {
    assert!(matches!(
        encode_ipv4("256.256.256.256"),
        Err(AddressParseError::InvalidOctet(_))
    ));
    assert!(encode_ipv4("1.2.3.256").is_err());
    assert!(encode_ipv4("999.0.0.1").is_err());
}

#[test]
fn test_malformed_input_is_rejected() {
    assert_eq!(encode_ipv4(""), Err(AddressParseError::Empty));
    assert_eq!(encode_ipv4("1.2.3"), Err(AddressParseError::SegmentCount(3)));
    assert_eq!(encode_ipv4("1.2.3.4.5"), Err(AddressParseError::SegmentCount(5)));

    for input in ["1..3.4", "a.b.c.d", "1.2.3.-4", "+1.2.3.4", " 1.2.3.4", "1.2.3.4 ", "01.2.3.4", "1.2.3.00"] {
        assert!(encode_ipv4(input).is_err(), "{input:?} should be rejected");
    }
}

#[test]
fn test_decode_inverts_encode() {
    for text in ["0.0.0.0", "10.0.0.1", "172.16.254.3", "192.168.1.255", "255.255.255.255"] {
        let id = encode_ipv4(text).unwrap();
        assert_eq!(decode_ipv4(id), text);
    }
}

#[test]
fn test_encoding_preserves_order() {
    let ordered = ["0.0.0.255", "0.0.1.0", "0.255.255.255", "1.0.0.0", "9.255.255.255", "10.0.0.0"];
    let ids: Vec<u32> = ordered.iter().map(|t| encode_ipv4(t).unwrap()).collect();
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
}
