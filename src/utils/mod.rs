pub mod ip;

pub use ip::{AddressId, AddressParseError, decode_ipv4, encode_ipv4};
