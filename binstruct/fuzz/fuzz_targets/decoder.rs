#![no_main]

use arbitrary::Arbitrary;
use binstruct::{Config, Decoder, Error, ErrorKind, Prefix};
use bytes::Bytes;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug, Clone, Copy)]
enum FuzzPrefix {
    U8,
    Be16,
    Le16,
    Be32,
    Le32,
    Be64,
    Le64,
    ULeb128,
}

impl From<FuzzPrefix> for Prefix {
    fn from(prefix: FuzzPrefix) -> Self {
        match prefix {
            FuzzPrefix::U8 => Prefix::U8,
            FuzzPrefix::Be16 => Prefix::Be16,
            FuzzPrefix::Le16 => Prefix::Le16,
            FuzzPrefix::Be32 => Prefix::Be32,
            FuzzPrefix::Le32 => Prefix::Le32,
            FuzzPrefix::Be64 => Prefix::Be64,
            FuzzPrefix::Le64 => Prefix::Le64,
            FuzzPrefix::ULeb128 => Prefix::ULeb128,
        }
    }
}

#[derive(Arbitrary, Debug)]
enum Op {
    Bool,
    U8,
    I8,
    U16Be,
    I16Le,
    U32Le,
    I32Be,
    U64Be,
    I64Le,
    ULeb128,
    SLeb128,
    CString,
    Block(i64),
    Prefixed(FuzzPrefix),
    SetPosition(usize),
    Skip(usize),
    Reinit(Vec<u8>),
}

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    data: Vec<u8>,
    max_block_len: Option<u16>,
    ops: Vec<Op>,
}

// Fixed-width reads must either consume exactly `width` bytes or nothing.
fn check_fixed<T>(decoder: &mut Decoder, width: usize, f: fn(&mut Decoder) -> Result<T, Error>) {
    let before = decoder.position();
    match f(decoder) {
        Ok(_) => assert_eq!(decoder.position(), before + width),
        Err(err) => {
            assert_eq!(err.kind(), ErrorKind::OutOfBounds);
            assert_eq!(decoder.position(), before);
        }
    }
}

fn fuzz(input: FuzzInput) {
    let cfg = match input.max_block_len {
        Some(max) => Config::with_block_len(..=max as usize),
        None => Config::default(),
    };
    let mut decoder = Decoder::with_config(input.data, cfg);

    for op in input.ops {
        let before = decoder.position();
        match op {
            Op::Bool => check_fixed(&mut decoder, 1, Decoder::decode_bool),
            Op::U8 => check_fixed(&mut decoder, 1, Decoder::decode_u8),
            Op::I8 => check_fixed(&mut decoder, 1, Decoder::decode_i8),
            Op::U16Be => check_fixed(&mut decoder, 2, Decoder::decode_u16_be),
            Op::I16Le => check_fixed(&mut decoder, 2, Decoder::decode_i16_le),
            Op::U32Le => check_fixed(&mut decoder, 4, Decoder::decode_u32_le),
            Op::I32Be => check_fixed(&mut decoder, 4, Decoder::decode_i32_be),
            Op::U64Be => check_fixed(&mut decoder, 8, Decoder::decode_u64_be),
            Op::I64Le => check_fixed(&mut decoder, 8, Decoder::decode_i64_le),
            Op::ULeb128 => {
                let _ = decoder.decode_uleb128();
            }
            Op::SLeb128 => {
                let _ = decoder.decode_sleb128();
            }
            Op::CString => match decoder.decode_cstring() {
                Ok(text) => {
                    assert!(!text.contains(&0));
                    assert!(decoder.position() > before);
                }
                Err(_) => assert_eq!(decoder.position(), decoder.len()),
            },
            Op::Block(len) => {
                let expected = decoder.data().slice(before..);
                match decoder.decode_block(len) {
                    Ok(block) => {
                        assert_eq!(decoder.position(), before + block.len());
                        assert_eq!(block, expected.slice(..block.len()));
                    }
                    Err(err) => {
                        if len < 0 {
                            assert_eq!(err.kind(), ErrorKind::InvalidArgument);
                        }
                        assert_eq!(decoder.position(), before);
                    }
                }
            }
            Op::Prefixed(prefix) => {
                if let Ok(block) = decoder.decode_prefixed(prefix.into()) {
                    assert!(decoder.config().block_len.contains(&block.len()));
                }
            }
            Op::SetPosition(position) => match decoder.set_position(position) {
                Ok(()) => assert_eq!(decoder.position(), position),
                Err(_) => assert_eq!(decoder.position(), before),
            },
            Op::Skip(count) => {
                if decoder.skip(count).is_err() {
                    assert_eq!(decoder.position(), before);
                }
            }
            Op::Reinit(data) => {
                decoder.reinit(Bytes::from(data));
                assert_eq!(decoder.position(), 0);
            }
        }
        assert!(decoder.position() <= decoder.len());
    }
}

fuzz_target!(|input: FuzzInput| {
    fuzz(input);
});
