/// Translate a flow-log protocol number to its canonical lowercase name.
///
/// Only the protocols that appear in the lookup data are recognized;
/// anything else returns `None` and the record is dropped from both
/// frequency tables rather than counted under an "unknown" bucket.
pub fn translate_protocol(number: &str) -> Option<&'static str> {
    match number {
        "6" => Some("tcp"),
        "17" => Some("udp"),
        "1" => Some("icmp"),
        _ => None,
    }
}
