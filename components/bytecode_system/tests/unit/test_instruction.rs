//! Packed encoding tests against hand-computed words.

use bytecode_system::{Instruction, Op};

#[test]
fn test_add_word_layout() {
    let word = Instruction::Add {
        dest: 0x0A,
        left: 0x0B,
        right: 0x0C,
    }
    .encode();
    assert_eq!(word, (3 << 26) | (0x0A << 16) | (0x0B << 8) | 0x0C);
}

#[test]
fn test_loadk_word_layout() {
    let word = Instruction::LoadK {
        dest: 2,
        index: 0x1234,
    }
    .encode();
    assert_eq!(word, (8 << 26) | (2 << 16) | 0x1234);
}

#[test]
fn test_call_word_layout() {
    let word = Instruction::Call {
        base: 4,
        argc: 3,
        result: 9,
    }
    .encode();
    assert_eq!(word, (10 << 26) | (4 << 16) | (3 << 8) | 9);
}

#[test]
fn test_copy_src_sits_in_low_byte() {
    let word = Instruction::Copy { dest: 7, src: 5 }.encode();
    assert_eq!(word, (9 << 26) | (7 << 16) | 5);
}

#[test]
fn test_jump_width_asymmetry() {
    // JMP targets are 26 bits wide; JMPF targets only 16. The same
    // address can be in range for one and out of range for the other.
    let far = 0x0001_0000u32;
    let jmp = Instruction::Jmp { target: far }.encode();
    assert_eq!(jmp & 0x03FF_FFFF, far);

    let jmpf = Instruction::Jmpf {
        cond: 0,
        target: 0xFFFF,
    }
    .encode();
    assert_eq!(jmpf & 0xFFFF, 0xFFFF);
    assert_eq!(Op::of_word(jmpf), Some(Op::Jmpf));
}

#[test]
fn test_every_opcode_roundtrips_through_decode() {
    let all = [
        Instruction::Print { reg: 1 },
        Instruction::Halt,
        Instruction::Add {
            dest: 1,
            left: 2,
            right: 3,
        },
        Instruction::Sub {
            dest: 1,
            left: 2,
            right: 3,
        },
        Instruction::Mul {
            dest: 1,
            left: 2,
            right: 3,
        },
        Instruction::Div {
            dest: 1,
            left: 2,
            right: 3,
        },
        Instruction::Pow {
            dest: 1,
            left: 2,
            right: 3,
        },
        Instruction::LoadK { dest: 1, index: 2 },
        Instruction::Copy { dest: 1, src: 2 },
        Instruction::Call {
            base: 1,
            argc: 2,
            result: 3,
        },
        Instruction::Lt {
            dest: 1,
            left: 2,
            right: 3,
        },
        Instruction::Le {
            dest: 1,
            left: 2,
            right: 3,
        },
        Instruction::Gt {
            dest: 1,
            left: 2,
            right: 3,
        },
        Instruction::Ge {
            dest: 1,
            left: 2,
            right: 3,
        },
        Instruction::Eq {
            dest: 1,
            left: 2,
            right: 3,
        },
        Instruction::Neq {
            dest: 1,
            left: 2,
            right: 3,
        },
        Instruction::Neg { dest: 1, src: 2 },
        Instruction::Not { dest: 1, src: 2 },
        Instruction::Jmp { target: 123 },
        Instruction::Jmpf {
            cond: 1,
            target: 123,
        },
    ];
    for inst in all {
        assert_eq!(Instruction::decode(inst.encode()).unwrap(), inst);
    }
}
