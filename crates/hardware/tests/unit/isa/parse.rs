//! Parser and Decode Table Tests.

use pretty_assertions::assert_eq;
use rstest::rstest;

use pipesim_core::common::LoadError;
use pipesim_core::isa::{Opcode, Operands, parse_program};

fn decode_one(line: &str) -> Operands {
    let table = parse_program(line).unwrap_or_else(|e| panic!("{line}: {e}"));
    table[0].operands()
}

#[rstest]
#[case("add R1 R2 #5", Some(1), Some(2), None, Some(5))]
#[case("subl R1 R2 R3", Some(1), Some(2), Some(3), None)]
#[case("ld R4 #8", Some(4), None, None, Some(8))]
#[case("ldl R4 R5", Some(4), Some(5), None, None)]
#[case("st R6 #8", None, Some(6), None, Some(8))]
#[case("stl R6 R7", None, Some(6), Some(7), None)]
#[case("set R9 #-1", Some(9), None, None, Some(-1))]
#[case("bltz R3 #20", None, Some(3), None, Some(20))]
#[case("ret", None, None, None, None)]
fn decode_table(
    #[case] line: &str,
    #[case] dest: Option<usize>,
    #[case] src1: Option<usize>,
    #[case] src2: Option<usize>,
    #[case] imm: Option<i32>,
) {
    assert_eq!(
        decode_one(line),
        Operands {
            dest,
            src1,
            src2,
            imm
        }
    );
}

#[test]
fn every_mnemonic_parses() {
    let source = "mul R1 R2 #3\nadd R1 R2 #3\nsub R1 R2 #3\ndiv R1 R2 #3\nld R1 #4\nst R1 #4\n\
                  mull R1 R2 R3\naddl R1 R2 R3\nsubl R1 R2 R3\ndivl R1 R2 R3\n\
                  ldl R1 R2\nstl R1 R2\nset R1 #1\n\
                  bez R1 #0\nbgez R1 #0\nblez R1 #0\nbgtz R1 #0\nbltz R1 #0\nret\n";
    let table = parse_program(source).unwrap_or_else(|e| panic!("{e}"));
    let opcodes: Vec<_> = table.iter().map(|i| i.opcode).collect();
    assert_eq!(opcodes, Opcode::ALL.to_vec());
}

#[test]
fn mnemonics_are_case_insensitive() {
    let table = parse_program("0 SET R1 #2\n1 Add r2 r1 #1\n2 RET\n").unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(table[1].opcode, Opcode::Add);
    assert_eq!(table[1].rs1, 1);
}

#[test]
fn indices_follow_position() {
    let table = parse_program("7 set R1 #1\n\n; gap\n9 ret\n").unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(table.len(), 2);
    assert_eq!(table[0].index, 0);
    assert_eq!(table[1].index, 1);
}

#[rstest]
#[case::bad_register("set Rx #1")]
#[case::bad_immediate("set R1 #one")]
#[case::bare_number("set R1 5")]
#[case::missing_operand("add R1 R2")]
fn malformed_lines(#[case] line: &str) {
    assert!(matches!(
        parse_program(line),
        Err(LoadError::Malformed { line: 1, .. })
    ));
}

#[test]
fn load_error_messages_name_the_line() {
    let err = parse_program("set R1 #1\nfoo R1\n").err().map(|e| e.to_string());
    assert_eq!(err.as_deref(), Some("line 2: unknown mnemonic `foo`"));
}
