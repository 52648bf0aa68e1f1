//! CRC-8 protecting every data word the sensor sends.
//!
//! Width 8, polynomial 0x31 (x^8 + x^5 + x^4 + 1), init 0xFF, no reflection,
//! no final XOR. CRC(0xBE, 0xEF) = 0x92.

use ::crc::{Crc, NoTable, CRC_8_NRSC_5};

// NRSC-5 is the catalogued name of the sensor's parameter set. NoTable
// computes it bit by bit without a lookup table.
const CRC: Crc<u8, NoTable> = Crc::<u8, NoTable>::new(&CRC_8_NRSC_5);

pub fn crc8(bytes: &[u8; 2]) -> u8 {
    CRC.checksum(bytes)
}

/// Checks the trailing CRC byte of a response frame.
///
/// On mismatch returns `(expected, actual)`, where `expected` is the CRC
/// computed over the two data bytes and `actual` the byte that was received.
pub fn check_frame(frame: &[u8; 3]) -> Result<[u8; 2], (u8, u8)> {
    let data = [frame[0], frame[1]];
    let expected = crc8(&data);
    if expected == frame[2] {
        Ok(data)
    } else {
        Err((expected, frame[2]))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    // MSB-first shift register, one bit at a time
    fn bitwise(bytes: &[u8; 2]) -> u8 {
        let mut crc = 0xFFu8;
        for byte in bytes {
            crc ^= byte;
            for _ in 0..8 {
                crc = if crc & 0x80 != 0 {
                    (crc << 1) ^ 0x31
                } else {
                    crc << 1
                };
            }
        }
        crc
    }

    #[test]
    fn golden_vector() {
        assert_eq!(crc8(&[0xBE, 0xEF]), 0x92);
        assert_eq!(bitwise(&[0xBE, 0xEF]), 0x92);
    }

    #[test]
    fn matches_shift_register() {
        for hi in 0..=u8::MAX {
            for lo in 0..=u8::MAX {
                assert_eq!(crc8(&[hi, lo]), bitwise(&[hi, lo]));
            }
        }
    }

    #[test]
    fn check_frame_accepts_and_rejects() {
        assert_eq!(check_frame(&[0xBE, 0xEF, 0x92]), Ok([0xBE, 0xEF]));
        assert_eq!(check_frame(&[0xBE, 0xEF, 0x00]), Err((0x92, 0x00)));
    }
}
