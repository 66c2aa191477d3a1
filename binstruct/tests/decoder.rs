//! End-to-end decoding through the public `Decoder` surface.

use binstruct::{Config, Decoder, Error, ErrorKind};
use bytes::{Buf, Bytes};
use test_case::test_case;

#[test]
fn test_new_decoder_starts_at_zero() {
    let decoder = Decoder::new(&b"\x11\x22\x00\x44\x55"[..]);
    assert_eq!(decoder.position(), 0);
    assert_eq!(decoder.data(), &Bytes::from_static(b"\x11\x22\x00\x44\x55"));
}

#[test]
fn test_position_roundtrip() {
    let mut decoder = Decoder::new(&b"\x11\x22\x00\x44\x55"[..]);
    for position in 0..=decoder.len() {
        decoder.set_position(position).unwrap();
        assert_eq!(decoder.position(), position);
    }

    decoder.set_position(1).unwrap();
    decoder.skip(1).unwrap();
    decoder.skip(1).unwrap();
    assert_eq!(decoder.position(), 3);

    let err = decoder.set_position(6).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutOfBounds);
    assert_eq!(decoder.position(), 3);
}

#[test]
fn test_reinit_resets_position() {
    let mut decoder = Decoder::new(&b"\x11\x22\x00\x44\x55"[..]);
    decoder.skip(1).unwrap();
    decoder.reinit(&b"other"[..]);
    assert_eq!(decoder.data(), &Bytes::from_static(b"other"));
    assert_eq!(decoder.position(), 0);
}

#[test]
fn test_empty_buffer() {
    let mut decoder = Decoder::new(Bytes::new());
    assert_eq!(decoder.decode_u8(), Err(Error::EndOfBuffer(1, 0)));
    assert!(decoder.skip(1).unwrap_err().is_out_of_bounds());
    assert_eq!(decoder.decode_uleb128(), Err(Error::UnterminatedVarint));
    assert_eq!(decoder.decode_sleb128(), Err(Error::UnterminatedVarint));
    assert_eq!(decoder.decode_cstring(), Err(Error::EndOfBuffer(1, 0)));
    assert!(decoder.decode_block(0).unwrap().is_empty());
    assert_eq!(decoder.position(), 0);
}

#[test]
fn test_bool() {
    let mut decoder = Decoder::new(&b"\x00\x01"[..]);
    assert!(!decoder.decode_bool().unwrap());
    assert_eq!(decoder.position(), 1);
    assert!(decoder.decode_bool().unwrap());
    assert_eq!(decoder.position(), 2);
    let err = decoder.decode_bool().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutOfBounds);
    assert_eq!(decoder.position(), 2);
}

#[test]
fn test_bytes() {
    let mut decoder = Decoder::new(&b"\x81\x82"[..]);
    assert_eq!(decoder.decode_u8().unwrap(), 0x81);
    assert_eq!(decoder.position(), 1);
    assert_eq!(decoder.decode_u8().unwrap(), 0x82);

    decoder.set_position(0).unwrap();
    assert_eq!(decoder.decode_i8().unwrap(), -127);
    assert_eq!(decoder.decode_i8().unwrap(), -126);
    assert_eq!(decoder.position(), 2);
}

const SEQUENCE: &[u8] = b"\x81\x82\x83\x84\x85\x86\x87\x88";

#[test]
fn test_big_endian() {
    let mut decoder = Decoder::new(SEQUENCE);
    assert_eq!(decoder.decode_u16_be().unwrap(), 0x8182);
    assert_eq!(decoder.position(), 2);
    decoder.set_position(0).unwrap();
    assert_eq!(decoder.decode_i16_be().unwrap(), -32382);
    decoder.set_position(0).unwrap();
    assert_eq!(decoder.decode_u32_be().unwrap(), 0x81828384);
    assert_eq!(decoder.position(), 4);
    decoder.set_position(0).unwrap();
    assert_eq!(decoder.decode_i32_be().unwrap(), -2122153084);
    decoder.set_position(0).unwrap();
    assert_eq!(decoder.decode_u64_be().unwrap(), 0x8182838485868788);
    assert_eq!(decoder.position(), 8);
    decoder.set_position(0).unwrap();
    assert_eq!(decoder.decode_i64_be().unwrap(), -9114578090645354616);
}

#[test]
fn test_little_endian() {
    let mut decoder = Decoder::new(SEQUENCE);
    assert_eq!(decoder.decode_u16_le().unwrap(), 0x8281);
    decoder.set_position(0).unwrap();
    assert_eq!(decoder.decode_i16_le().unwrap(), -32127);
    decoder.set_position(0).unwrap();
    assert_eq!(decoder.decode_u32_le().unwrap(), 0x84838281);
    decoder.set_position(0).unwrap();
    assert_eq!(decoder.decode_i32_le().unwrap(), -2071756159);
    decoder.set_position(0).unwrap();
    assert_eq!(decoder.decode_u64_le().unwrap(), 0x8887868584838281);
    decoder.set_position(0).unwrap();
    assert_eq!(decoder.decode_i64_le().unwrap(), -8608764254683430271);
    assert_eq!(decoder.position(), 8);
}

#[test]
fn test_short_fixed_width_keeps_position() {
    let mut decoder = Decoder::new(SEQUENCE);
    decoder.set_position(5).unwrap();
    assert!(decoder.decode_u64_be().is_err());
    assert!(decoder.decode_i64_le().is_err());
    assert!(decoder.decode_u32_le().is_err());
    assert!(decoder.decode_i32_be().is_err());
    assert_eq!(decoder.position(), 5);
    assert_eq!(decoder.decode_u16_be().unwrap(), 0x8687);
    assert_eq!(decoder.decode_u16_le(), Err(Error::EndOfBuffer(2, 1)));
    assert_eq!(decoder.position(), 7);
}

#[test_case(b"\xE5\x8E\x26\x00\xFF", 624485, 3; "value")]
#[test_case(b"\x00", 0, 1; "zero")]
#[test_case(b"\x80\x01", 128, 2; "messy")]
#[test_case(b"\xFF\xFF\xFF\xFF\xFF\xFF\xFF\xFF\xFF\x01", u64::MAX, 10; "max")]
fn test_uleb128(input: &'static [u8], expected: u64, position: usize) {
    let mut decoder = Decoder::new(input);
    assert_eq!(decoder.decode_uleb128().unwrap(), expected);
    assert_eq!(decoder.position(), position);
}

#[test_case(b"\x9B\xF1\x59\x00\xFF", -624485, 3; "value")]
#[test_case(b"\x00", 0, 1; "zero")]
#[test_case(b"\x80\x01", 128, 2; "messy")]
#[test_case(b"\x80\x80\x80\x80\x80\x80\x80\x80\x80\x7F", i64::MIN, 10; "min")]
fn test_sleb128(input: &'static [u8], expected: i64, position: usize) {
    let mut decoder = Decoder::new(input);
    assert_eq!(decoder.decode_sleb128().unwrap(), expected);
    assert_eq!(decoder.position(), position);
}

#[test]
fn test_leb128_corrupt() {
    let mut decoder = Decoder::new(&b"\x80"[..]);
    assert_eq!(decoder.decode_uleb128(), Err(Error::UnterminatedVarint));
    assert_eq!(decoder.position(), 1);

    let mut decoder = Decoder::new(&b"\x80"[..]);
    let err = decoder.decode_sleb128().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutOfBounds);
    assert_eq!(decoder.position(), 1);
}

#[test]
fn test_leb128_too_large() {
    let mut decoder = Decoder::new(&b"\xFF\xFF\xFF\xFF\xFF\xFF\xFF\xFF\xFF\x03"[..]);
    let err = decoder.decode_uleb128().unwrap_err();
    assert_eq!(err, Error::InvalidVarint);
    assert_eq!(err.kind(), ErrorKind::OutOfBounds);
}

#[test]
fn test_cstring() {
    let mut decoder = Decoder::new(&b"test\x00next\x00"[..]);
    assert_eq!(&decoder.decode_cstring().unwrap()[..], b"test");
    assert_eq!(decoder.position(), 5);
    assert_eq!(&decoder.decode_cstring().unwrap()[..], b"next");
    assert_eq!(decoder.position(), 10);
    assert!(decoder.decode_cstring().is_err());
}

#[test]
fn test_cstring_unterminated() {
    let mut decoder = Decoder::new(&b"test"[..]);
    assert_eq!(&decoder.decode_cstring().unwrap()[..], b"test");
    assert_eq!(decoder.position(), 4);
}

#[test]
fn test_block() {
    let mut decoder = Decoder::new(&b"test\x11"[..]);
    assert_eq!(&decoder.decode_block(4).unwrap()[..], b"test");
    assert_eq!(decoder.position(), 4);
    assert_eq!(&decoder.decode_block(1).unwrap()[..], b"\x11");
    assert_eq!(decoder.position(), 5);
    assert!(decoder.decode_block(0).unwrap().is_empty());
    assert_eq!(decoder.position(), 5);
}

#[test]
fn test_block_errors() {
    let mut decoder = Decoder::new(&b"test\x11"[..]);
    assert_eq!(
        decoder.decode_block(-1).unwrap_err().kind(),
        ErrorKind::InvalidArgument
    );
    assert_eq!(
        decoder.decode_block(6).unwrap_err().kind(),
        ErrorKind::OutOfBounds
    );
    assert_eq!(decoder.position(), 0);

    decoder.set_position(5).unwrap();
    assert!(decoder.decode_block(1).is_err());
    assert_eq!(decoder.position(), 5);
}

#[test]
fn test_block_matches_buffer() {
    let data: Vec<u8> = (0..=255).collect();
    let mut decoder = Decoder::new(data.clone());
    let mut offset = 0;
    for len in [0usize, 1, 7, 0, 64, 100, 84] {
        let block = decoder.decode_block(len).unwrap();
        assert_eq!(&block[..], &data[offset..offset + len]);
        offset += len;
        assert_eq!(decoder.position(), offset);
    }
    assert!(!decoder.has_remaining());
}

#[test]
fn test_block_u8() {
    let mut decoder = Decoder::new(&b"\x03test"[..]);
    assert_eq!(&decoder.decode_block_u8().unwrap()[..], b"tes");
    assert_eq!(decoder.position(), 4);

    let mut decoder = Decoder::new(&b"\x00test"[..]);
    assert!(decoder.decode_block_u8().unwrap().is_empty());
    assert_eq!(decoder.position(), 1);
}

#[test]
fn test_block_u8_short_keeps_prefix() {
    let mut decoder = Decoder::new(&b"\x05test"[..]);
    let err = decoder.decode_block_u8().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutOfBounds);
    assert_eq!(decoder.position(), 1);
}

type BlockFn = fn(&mut Decoder) -> Result<Bytes, Error>;

#[test_case(b"\x00\x03test", Decoder::decode_block_be16, 5; "be16")]
#[test_case(b"\x03\x00test", Decoder::decode_block_le16, 5; "le16")]
#[test_case(b"\x00\x00\x00\x03test", Decoder::decode_block_be32, 7; "be32")]
#[test_case(b"\x03\x00\x00\x00test", Decoder::decode_block_le32, 7; "le32")]
#[test_case(b"\x00\x00\x00\x00\x00\x00\x00\x03test", Decoder::decode_block_be64, 11; "be64")]
#[test_case(b"\x03\x00\x00\x00\x00\x00\x00\x00test", Decoder::decode_block_le64, 11; "le64")]
#[test_case(b"\x03test", Decoder::decode_block_uleb128, 4; "uleb128")]
#[test_case(b"\x84\x80\x80\x00test", Decoder::decode_block_uleb128, 8; "uleb128 padded")]
fn test_prefixed_block(input: &'static [u8], decode: BlockFn, position: usize) {
    let mut decoder = Decoder::new(input);
    let block = decode(&mut decoder).unwrap();
    assert!(b"test".starts_with(&block));
    assert_eq!(decoder.position(), position);
}

#[test_case(b"\x05\x00test", Decoder::decode_block_be16; "be16")]
#[test_case(b"\x00\x05test", Decoder::decode_block_le16; "le16")]
#[test_case(b"\x05\x00\x00\x00test", Decoder::decode_block_be32; "be32")]
#[test_case(b"\x00\x00\x00\x05test", Decoder::decode_block_le32; "le32")]
#[test_case(b"\x05\x00\x00\x00\x00\x00\x00\x00test", Decoder::decode_block_be64; "be64")]
#[test_case(b"\x00\x00\x00\x05\x00\x00\x00\x00test", Decoder::decode_block_le64; "le64")]
#[test_case(b"\x05test", Decoder::decode_block_uleb128; "uleb128")]
#[test_case(b"", Decoder::decode_block_be16; "be16 empty")]
#[test_case(b"", Decoder::decode_block_le64; "le64 empty")]
#[test_case(b"", Decoder::decode_block_uleb128; "uleb128 empty")]
fn test_prefixed_block_errors(input: &'static [u8], decode: BlockFn) {
    let mut decoder = Decoder::new(input);
    let err = decode(&mut decoder).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutOfBounds);
    assert!(decoder.position() <= decoder.len());
}

#[test]
fn test_prefixed_block_limit() {
    let mut decoder = Decoder::with_config(&b"\x00\x04test"[..], Config::with_block_len(..=3));
    assert_eq!(decoder.decode_block_be16(), Err(Error::LengthExceeded(4)));
    assert_eq!(decoder.position(), 2);

    decoder.reinit(&b"\x03test"[..]);
    assert_eq!(&decoder.decode_block_uleb128().unwrap()[..], b"tes");
}

#[test]
fn test_record_stream() {
    // Records of (be16 tag, uleb128 length-prefixed payload, cstring name).
    let mut data = Vec::new();
    for (tag, payload, name) in [(1u16, &b"ab"[..], &b"first"[..]), (2, &b""[..], &b"second"[..])] {
        data.extend_from_slice(&tag.to_be_bytes());
        data.push(payload.len() as u8);
        data.extend_from_slice(payload);
        data.extend_from_slice(name);
        data.push(0);
    }
    let mut decoder = Decoder::new(data);

    let mut records = Vec::new();
    while decoder.has_remaining() {
        let tag = decoder.decode_u16_be().unwrap();
        let payload = decoder.decode_block_uleb128().unwrap();
        let name = decoder.decode_cstring().unwrap();
        records.push((tag, payload, name));
    }
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].0, 1);
    assert_eq!(&records[0].1[..], b"ab");
    assert_eq!(&records[1].2[..], b"second");
    assert_eq!(decoder.decode_u16_be().unwrap_err().kind(), ErrorKind::OutOfBounds);
}
