use super::geo::Coordinate;
use thiserror::Error;

// 1e-5 degree precision, the fixed precision of the directions APIs we talk to.
const PRECISION: f64 = 1e5;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PolylineError {
    #[error("invalid byte {byte:#04x} at offset {position}")]
    InvalidByte { byte: u8, position: usize },

    #[error("unexpected end of encoded polyline")]
    Truncated,
}

/// Decodes an encoded polyline into its coordinate sequence.
///
/// Values are interleaved delta-encoded signed integers in 5-bit groups
/// offset by 63, accumulated cumulatively per point.
pub fn decode(encoded: &str) -> Result<Vec<Coordinate>, PolylineError> {
    let bytes = encoded.as_bytes();
    let mut pos = 0;
    let mut lat = 0i64;
    let mut lng = 0i64;
    let mut path = Vec::new();

    while pos < bytes.len() {
        lat += read_delta(bytes, &mut pos)?;
        lng += read_delta(bytes, &mut pos)?;
        path.push(Coordinate::new(lat as f64 / PRECISION, lng as f64 / PRECISION));
    }

    Ok(path)
}

/// Encodes a coordinate sequence into the compact polyline format.
pub fn encode(path: &[Coordinate]) -> String {
    let mut out = String::new();
    let mut prev_lat = 0i64;
    let mut prev_lng = 0i64;

    for point in path {
        let lat = (point.latitude * PRECISION).round() as i64;
        let lng = (point.longitude * PRECISION).round() as i64;
        write_delta(lat - prev_lat, &mut out);
        write_delta(lng - prev_lng, &mut out);
        prev_lat = lat;
        prev_lng = lng;
    }

    out
}

fn read_delta(bytes: &[u8], pos: &mut usize) -> Result<i64, PolylineError> {
    let mut acc = 0i64;
    let mut shift = 0u32;

    loop {
        let byte = *bytes.get(*pos).ok_or(PolylineError::Truncated)?;
        if byte < 63 {
            return Err(PolylineError::InvalidByte {
                byte,
                position: *pos,
            });
        }
        *pos += 1;

        let chunk = i64::from(byte - 63);
        acc |= (chunk & 0x1f) << shift;
        shift += 5;

        if chunk & 0x20 == 0 {
            break;
        }
    }

    // Lowest bit carries the sign.
    Ok(if acc & 1 != 0 { !(acc >> 1) } else { acc >> 1 })
}

fn write_delta(value: i64, out: &mut String) {
    let shifted = if value < 0 { !(value << 1) } else { value << 1 };
    let mut v = shifted as u64;

    while v >= 0x20 {
        out.push((((0x20 | (v & 0x1f)) as u8) + 63) as char);
        v >>= 5;
    }
    out.push(((v as u8) + 63) as char);
}

#[cfg(test)]
mod tests {
    use super::*;

    // The reference vector from the polyline format documentation.
    const REFERENCE: &str = "_p~iF~ps|U_ulLnnqC_mqNvxq`@";

    #[test]
    fn decodes_reference_vector() {
        let path = decode(REFERENCE).unwrap();
        let expected = [(38.5, -120.2), (40.7, -120.95), (43.252, -126.453)];
        assert_eq!(path.len(), expected.len());
        for (point, (lat, lng)) in path.iter().zip(expected) {
            assert!((point.latitude - lat).abs() < 1e-5);
            assert!((point.longitude - lng).abs() < 1e-5);
        }
    }

    #[test]
    fn encode_round_trips_reference_vector() {
        let path = decode(REFERENCE).unwrap();
        assert_eq!(encode(&path), REFERENCE);
    }

    #[test]
    fn round_trips_within_precision() {
        let path = vec![
            Coordinate::new(19.0760, 72.8777),
            Coordinate::new(19.0966, 72.8260),
            Coordinate::new(-33.86882, 151.20929),
        ];
        let decoded = decode(&encode(&path)).unwrap();
        assert_eq!(decoded.len(), path.len());
        for (got, want) in decoded.iter().zip(&path) {
            assert!((got.latitude - want.latitude).abs() < 1e-5);
            assert!((got.longitude - want.longitude).abs() < 1e-5);
        }
    }

    #[test]
    fn empty_input_is_an_empty_path() {
        assert_eq!(decode("").unwrap(), Vec::new());
    }

    #[test]
    fn rejects_bytes_below_offset() {
        let err = decode(" ").unwrap_err();
        assert_eq!(
            err,
            PolylineError::InvalidByte {
                byte: b' ',
                position: 0
            }
        );
    }

    #[test]
    fn rejects_truncated_input() {
        // A latitude delta with no longitude following it.
        assert_eq!(decode("?").unwrap_err(), PolylineError::Truncated);
    }
}
