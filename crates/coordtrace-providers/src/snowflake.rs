use crate::{Error, Result};

/// Twitter snowflake ids encode a millisecond timestamp in their top 42
/// bits, offset from the Twitter epoch (2010-11-04T01:42:54.657Z) rather
/// than the Unix epoch. coordtrace only needs *relative* ordering within a
/// corpus, so the epoch offset is irrelevant here — `id >> 22` is kept in
/// milliseconds-since-Twitter-epoch and converted straight to fractional
/// seconds.
pub fn timestamp(id: &str) -> Result<f64> {
    let raw: u64 = id
        .parse()
        .map_err(|_| Error::Malformed(format!("non-numeric snowflake id: {id}")))?;
    Ok((raw >> 22) as f64 / 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_numeric_ids() {
        assert!(timestamp("not-a-number").is_err());
    }

    #[test]
    fn shifts_out_the_low_22_bits() {
        let id = (12345u64 << 22).to_string();
        assert_eq!(timestamp(&id).unwrap(), 12345.0 / 1000.0);
    }
}
