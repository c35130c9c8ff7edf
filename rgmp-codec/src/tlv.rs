//! TLV tree decoder
//!
//! Decodes the message carried by a request:
//!
//! ```text
//! message := tag(3) length group*
//! group   := tag(2) length field*
//! field   := tag(3) length value
//! ```
//!
//! Each `length` is a [`TlvLength`] and counts exactly the bytes of the
//! children (or of the value, for fields). Children are decoded until the
//! cursor reaches the parent's boundary; every read is checked against that
//! boundary first, so a child can never consume bytes belonging to a sibling
//! of its parent.

use rgmp_core::{Field, Group, Level, Message, RgmpError, RgmpResult, Tag};

use crate::cursor::Cursor;
use crate::length::TlvLength;

/// Tag and length of one TLV unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Header {
    tag: Tag,
    length: usize,
    /// Position just past the unit's payload
    end: usize,
}

/// Recursive-descent decoder over a shared cursor
///
/// # Boundaries
///
/// Every decode method takes the absolute position its input must not cross.
/// A read that would cross it fails with `TruncatedData`, naming the level
/// being decoded. Boundaries past the end of the cursor's buffer are clamped
/// to the buffer end.
pub struct TlvDecoder<'c, 'a> {
    cursor: &'c mut Cursor<'a>,
}

impl<'c, 'a> TlvDecoder<'c, 'a> {
    /// Create a decoder reading from `cursor`'s current position
    pub fn new(cursor: &'c mut Cursor<'a>) -> Self {
        Self { cursor }
    }

    /// Current cursor position
    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    /// Decode one message ending no later than `boundary`
    ///
    /// The cursor is left just past the message's groups; bytes between there
    /// and `boundary` are not consumed.
    pub fn decode_message(&mut self, boundary: usize) -> RgmpResult<Message> {
        let header = self.decode_header(Level::Message, boundary)?;
        let groups = self.decode_groups(header.end)?;
        Ok(Message::new(header.tag, header.length, groups))
    }

    /// Decode groups until the cursor reaches `end`
    pub fn decode_groups(&mut self, end: usize) -> RgmpResult<Vec<Group>> {
        let mut groups = Vec::new();
        while self.cursor.position() < end {
            let header = self.decode_header(Level::Group, end)?;
            let fields = self.decode_fields(header.end)?;
            groups.push(Group::new(header.tag, header.length, fields));
        }
        Ok(groups)
    }

    /// Decode fields until the cursor reaches `end`
    pub fn decode_fields(&mut self, end: usize) -> RgmpResult<Vec<Field>> {
        let mut fields = Vec::new();
        while self.cursor.position() < end {
            let header = self.decode_header(Level::Field, end)?;
            let value = self.cursor.read_bytes(header.length)?;
            fields.push(Field::new(header.tag, value.to_vec()));
        }
        Ok(fields)
    }

    /// Read a tag and length, checking that the payload fits before `boundary`
    fn decode_header(&mut self, level: Level, boundary: usize) -> RgmpResult<Header> {
        self.ensure_within(level, level.tag_width(), boundary)?;
        let tag = Tag::new(self.cursor.read_bytes(level.tag_width())?);

        self.ensure_within(level, 1, boundary)?;
        let offset = self.cursor.position();
        let prefix = self.cursor.peek_u8()?;
        let width = TlvLength::width_for_prefix(prefix)
            .ok_or(RgmpError::MalformedLength { offset, prefix })?;
        self.ensure_within(level, width, boundary)?;
        let (length, _) = TlvLength::read(self.cursor)?;

        let length = length.value();
        self.ensure_within(level, length, boundary)?;

        Ok(Header {
            tag,
            length,
            end: self.cursor.position() + length,
        })
    }

    fn ensure_within(&self, level: Level, needed: usize, boundary: usize) -> RgmpResult<()> {
        let position = self.cursor.position();
        let available = boundary.min(self.cursor.len()).saturating_sub(position);
        if needed > available {
            return Err(RgmpError::TruncatedData {
                offset: position,
                level,
                needed,
                available,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn tlv(tag: &[u8], payload: &[u8]) -> Vec<u8> {
        let mut out = tag.to_vec();
        out.extend(TlvLength::new(payload.len()).unwrap().encode());
        out.extend_from_slice(payload);
        out
    }

    fn decode(data: &[u8]) -> RgmpResult<Message> {
        let mut cursor = Cursor::new(data);
        TlvDecoder::new(&mut cursor).decode_message(data.len())
    }

    #[test]
    fn test_decode_nested() {
        let f1 = tlv(&[0xa1, 0xa2, 0xa3], &[0x01, 0xAB, 0x00]);
        let f2 = tlv(&[0xb1, 0xb2, 0xb3], &[]);
        let g1 = tlv(&[0x10, 0x20], &[f1, f2].concat());
        let g2 = tlv(&[0x30, 0x40], &[]);
        let data = tlv(&[0x01, 0x02, 0x03], &[g1.clone(), g2].concat());

        let message = decode(&data).unwrap();
        assert_eq!(message.tag().to_hex(), "010203");
        assert_eq!(message.length(), data.len() - 4);
        assert_eq!(message.groups().len(), 2);

        let group = &message.groups()[0];
        assert_eq!(group.tag().to_hex(), "1020");
        assert_eq!(group.length(), g1.len() - 3);
        assert_eq!(group.fields().len(), 2);
        assert_eq!(group.fields()[0].tag().to_hex(), "a1a2a3");
        assert_eq!(group.fields()[0].value(), &[0x01, 0xAB, 0x00]);
        assert_eq!(group.fields()[1].length(), 0);

        let empty = &message.groups()[1];
        assert_eq!(empty.tag().to_hex(), "3040");
        assert!(empty.fields().is_empty());
    }

    #[test]
    fn test_empty_message() {
        let message = decode(&[0x01, 0x02, 0x03, 0x00]).unwrap();
        assert_eq!(message.length(), 0);
        assert!(message.groups().is_empty());
    }

    #[test]
    fn test_long_form_lengths() {
        let f1 = tlv(&[0, 0, 1], &[0x5a; 200]);
        let f2 = tlv(&[0, 0, 2], &[0xa5; 300]);
        assert_eq!(f1[3], 0x81);
        assert_eq!(f2[3], 0x82);
        let group = tlv(&[0, 1], &[f1, f2].concat());
        let data = tlv(&[9, 9, 9], &group);

        let message = decode(&data).unwrap();
        let fields = message.groups()[0].fields();
        assert_eq!(fields[0].length(), 200);
        assert_eq!(fields[1].length(), 300);
        assert!(fields[1].value().iter().all(|&b| b == 0xa5));
    }

    #[test]
    fn test_stops_at_message_boundary() {
        let mut data = tlv(&[1, 2, 3], &tlv(&[0x10, 0x20], &[]));
        let message_end = data.len();
        data.extend_from_slice(&[0xde, 0xad]);

        let mut cursor = Cursor::new(&data);
        let message = TlvDecoder::new(&mut cursor).decode_message(data.len()).unwrap();
        assert_eq!(message.groups().len(), 1);
        assert_eq!(cursor.position(), message_end);
    }

    #[test]
    fn test_field_value_overruns_group() {
        // group declares 5 bytes, field inside declares 4 bytes of value
        let data = [
            1, 2, 3, 0x08, // message, len 8
            0x10, 0x20, 0x05, // group, len 5
            0xa1, 0xa2, 0xa3, 0x04, 0xff, // field, len 4, only 1 byte left in group
        ];
        let err = decode(&data).unwrap_err();
        assert_eq!(
            err,
            RgmpError::TruncatedData {
                offset: 11,
                level: Level::Field,
                needed: 4,
                available: 1
            }
        );
    }

    #[test]
    fn test_group_header_crosses_message_boundary() {
        let data = [1, 2, 3, 0x01, 0x10, 0x20, 0x00];
        let err = decode(&data).unwrap_err();
        assert!(matches!(
            err,
            RgmpError::TruncatedData {
                level: Level::Group,
                offset: 4,
                needed: 2,
                available: 1
            }
        ));
    }

    #[test]
    fn test_message_longer_than_buffer() {
        let data = [1, 2, 3, 0x10, 0x10, 0x20, 0x00];
        let err = decode(&data).unwrap_err();
        assert!(matches!(
            err,
            RgmpError::TruncatedData {
                level: Level::Message,
                needed: 16,
                available: 3,
                ..
            }
        ));
    }

    #[test]
    fn test_missing_message_tag() {
        let err = decode(&[1, 2]).unwrap_err();
        assert!(matches!(
            err,
            RgmpError::TruncatedData {
                level: Level::Message,
                offset: 0,
                needed: 3,
                available: 2
            }
        ));
    }

    #[test]
    fn test_long_length_prefix_cut_by_boundary() {
        // field length prefix 0x82 needs 3 bytes, group has 2 left
        let data = [1, 2, 3, 0x08, 0x10, 0x20, 0x05, 0xa1, 0xa2, 0xa3, 0x82, 0x00];
        let err = decode(&data).unwrap_err();
        assert!(matches!(
            err,
            RgmpError::TruncatedData {
                level: Level::Field,
                offset: 10,
                needed: 3,
                available: 2
            }
        ));
    }

    #[test]
    fn test_malformed_length_in_field() {
        let data = [1, 2, 3, 0x08, 0x10, 0x20, 0x05, 0xa1, 0xa2, 0xa3, 0x83, 0x00];
        let err = decode(&data).unwrap_err();
        assert_eq!(
            err,
            RgmpError::MalformedLength {
                offset: 10,
                prefix: 0x83
            }
        );
    }

    fn arb_group() -> impl Strategy<Value = (Vec<u8>, usize)> {
        prop::collection::vec(prop::collection::vec(any::<u8>(), 0..160), 0..4).prop_map(
            |values| {
                let fields: Vec<u8> = values
                    .iter()
                    .flat_map(|v| tlv(&[0xf0, 0xf1, 0xf2], v))
                    .collect();
                (tlv(&[0x0a, 0x0b], &fields), values.len())
            },
        )
    }

    proptest! {
        #[test]
        fn prop_children_fill_parent_exactly(groups in prop::collection::vec(arb_group(), 0..4)) {
            let payload: Vec<u8> = groups.iter().flat_map(|(g, _)| g.clone()).collect();
            let data = tlv(&[1, 2, 3], &payload);

            let mut cursor = Cursor::new(&data);
            let message = TlvDecoder::new(&mut cursor).decode_message(data.len()).unwrap();
            prop_assert_eq!(cursor.position(), data.len());
            prop_assert_eq!(message.length(), payload.len());
            prop_assert_eq!(message.groups().len(), groups.len());

            for (group, (_, field_count)) in message.groups().iter().zip(&groups) {
                prop_assert_eq!(group.fields().len(), *field_count);
                let consumed: usize = group
                    .fields()
                    .iter()
                    .map(|f| 3 + TlvLength::new(f.length()).unwrap().encoded_len() + f.length())
                    .sum();
                prop_assert_eq!(consumed, group.length());
            }
        }
    }
}
