//! Code chunk behavior tests.

use bytecode_system::{CodeChunk, Instruction};
use core_types::Value;

#[test]
fn test_constants_are_append_only() {
    let mut chunk = CodeChunk::new(0);
    let a = chunk.add_constant(Value::Int(1));
    let b = chunk.add_constant(Value::Int(1));
    // No deduplication: every append gets a fresh index.
    assert_eq!((a, b), (0, 1));
}

#[test]
fn test_register_counter_seeded_at_local_count() {
    let mut chunk = CodeChunk::new(7);
    assert_eq!(chunk.alloc_register(), 7);
}

#[test]
fn test_reserved_slot_is_zero_until_patched() {
    let mut chunk = CodeChunk::new(0);
    let slot = chunk.reserve();
    assert_eq!(chunk.code[slot], 0);
    assert!(Instruction::decode(chunk.code[slot]).is_err());

    chunk.patch(slot, Instruction::Jmp { target: 0 });
    assert!(Instruction::decode(chunk.code[slot]).is_ok());
}

#[test]
fn test_emitted_words_decode_back() {
    let mut chunk = CodeChunk::new(2);
    chunk.emit(Instruction::Print { reg: 1 });
    chunk.emit(Instruction::Halt);
    let decoded: Vec<Instruction> = chunk
        .code
        .iter()
        .map(|w| Instruction::decode(*w).unwrap())
        .collect();
    assert_eq!(
        decoded,
        vec![Instruction::Print { reg: 1 }, Instruction::Halt]
    );
}
