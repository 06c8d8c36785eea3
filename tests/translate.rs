use asm2mem_rs::{Error, ErrorKind, InstructionSet, OutputLine, Translator};
use pretty_assertions::assert_eq;

const ISA: &str = "\
# demo instruction set
5: ADD {ri} {rj} {rk}
6: ADDI {ri} {const4}
10: LDC R{ri}, {const8}   # load constant
12: JMP {const8}
13: JMPZ {ri} {const8}
";

fn isa() -> InstructionSet {
    ISA.parse().unwrap()
}

fn words(src: &str) -> Vec<String> {
    let set = isa();
    Translator::assembly(&set)
        .translate_str(src)
        .unwrap()
        .words()
        .map(|(a, p)| format!("{a:03}: {p}"))
        .collect()
}

#[test]
fn add_three_registers() {
    let set = InstructionSet::parse("5: ADD {ri} {rj} {rk}").unwrap();
    let t = Translator::assembly(&set).translate_str("ADD 1 2 3").unwrap();
    assert_eq!(t.render(), "// ADD 1 2 3\n000: 000101 01\n001: 10 11 0000\n\n");
}

#[test]
fn const8_is_decimal_and_unused_fields_are_zero() {
    assert_eq!(words("LDC r2, 200"), vec!["000: 001010 10", "001: 200"]);
    assert_eq!(words("JMP -3"), vec!["000: 001100 00", "001: -3"]);
    assert_eq!(words("ADDI 0 -1"), vec!["000: 000110 00", "001: 00 00 -001"]);
}

#[test]
fn over_wide_register_is_not_truncated() {
    assert_eq!(words("ADD 4 5 0"), vec!["000: 000101 100", "001: 101 00 0000"]);
}

#[test]
fn data_line_takes_next_address() {
    let set = isa();
    let t = Translator::assembly(&set).translate_str("007:\n: 42").unwrap();
    assert_eq!(
        t.lines,
        vec![
            OutputLine::Comment("007.".into()),
            OutputLine::Word { address: 7, payload: "42".into() },
            OutputLine::Blank,
        ]
    );
    assert_eq!(t.render(), "// 007.\n007: 42\n\n");
}

#[test]
fn data_line_rewrites_only_first_hash() {
    assert_eq!(words(":  17 # count # of items"), vec!["000: 17 // count # of items"]);
    assert_eq!(words(":"), vec!["000: "]);
}

#[test]
fn full_line_comment_defuses_colons() {
    let set = isa();
    let t = Translator::assembly(&set).translate_str("   # note: a:b").unwrap();
    assert_eq!(t.render(), "//  note. a.b\n\n");
}

#[test]
fn relocation_moves_next_address() {
    let src = "ADD 1 1 1\n016: # code\nJMP 0";
    assert_eq!(
        words(src),
        vec!["000: 000101 01", "001: 01 01 0000", "016: 001100 00", "017: 0"]
    );
    let set = isa();
    let t = Translator::assembly(&set).translate_str("016: # code").unwrap();
    assert_eq!(t.render(), "// 016. # code\n\n");
}

#[test]
fn inline_comment_is_stripped_before_matching() {
    let set = isa();
    let t = Translator::assembly(&set).translate_str("  add 1 2 3   # sum: r1").unwrap();
    assert_eq!(t.lines[0], OutputLine::Comment("add 1 2 3   # sum: r1".into()));
    assert_eq!(t.words().count(), 2);
}

#[test]
fn first_matching_definition_wins() {
    let general_first = InstructionSet::parse("1: JMP {const8}\n2: JMPZ {ri} {const8}").unwrap();
    let t = Translator::assembly(&general_first).translate_str("JMPZ 1 9").unwrap();
    // `JMP\s+` cannot match `JMPZ`, so the second definition is used
    assert_eq!(t.words().next().unwrap().1, "000010 01");

    let loose = InstructionSet::parse("1: ADD {ri}\n2: ADD {ri} {rj} {rk}").unwrap();
    let t = Translator::assembly(&loose).translate_str("ADD 1 2 3").unwrap();
    assert_eq!(t.words().next().unwrap().1, "000001 01");
}

#[test]
fn blank_lines_pass_through_and_output_ends_with_one_blank() {
    let set = isa();
    let t = Translator::assembly(&set).translate_str("\n  \n: 1\n").unwrap();
    assert_eq!(t.render(), "\n\n000: 1\n\n");
    assert_eq!(Translator::assembly(&set).translate_str("").unwrap().render(), "\n");
}

#[test]
fn translation_is_idempotent() {
    let src = "# prog\n010:\nLDC R1, 5\nADD 1 1 2\n: 3 # three\n\n000:\nJMP 10\n";
    let set = isa();
    let a = Translator::assembly(&set).translate_str(src).unwrap().render();
    let b = Translator::assembly(&set).translate_str(src).unwrap().render();
    assert_eq!(a, b);
}

#[test]
fn whole_program() {
    let src = "\
# counter: loop forever
LDC R1, 1
ADD 0 0 1   # acc += 1
JMP 2

020:
: 255 # mask
";
    let set = isa();
    let out = Translator::assembly(&set).translate_str(src).unwrap().render();
    let expected = "\
//  counter. loop forever
// LDC R1, 1
000: 001010 01
001: 1
// ADD 0 0 1   # acc += 1
002: 000101 00
003: 00 01 0000
// JMP 2
004: 001100 00
005: 2

// 020.
020: 255 // mask

";
    assert_eq!(out, expected);
}

#[test]
fn backward_relocation_overlaps_on_reuse() {
    let set = isa();
    let err = Translator::assembly(&set)
        .translate_str(": 1\n: 2\n001:\n: 3")
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Overlap);
    match err {
        Error::Overlap { line, source } => {
            assert_eq!(line, 4);
            assert_eq!(source.address, 1);
        }
        other => panic!("unexpected {other:?}"),
    }
    // jumping back is fine as long as nothing lands on an issued address
    let t = Translator::assembly(&set).translate_str(": 1\n005:\n: 2\n002:\n: 3").unwrap();
    let addrs: Vec<u64> = t.words().map(|(a, _)| a).collect();
    assert_eq!(addrs, vec![0, 5, 2]);
}

#[test]
fn unknown_mnemonic_suggests_template() {
    let set = InstructionSet::parse("7: FOOBAR {ri} {rj}\n5: ADD {ri} {rj} {rk}").unwrap();
    let err = Translator::assembly(&set).translate_str("FOO 1 2").unwrap_err();
    match &err {
        Error::Instruction { line, suggestion, .. } => {
            assert_eq!(*line, 1);
            assert_eq!(suggestion.as_deref(), Some("FOOBAR {ri} {rj}"));
        }
        other => panic!("unexpected {other:?}"),
    }

    let err = Translator::assembly(&set).translate_str("\nadd 1 # too few").unwrap_err();
    assert_eq!(
        err.to_string(),
        "line 2: \"add 1\" does not match any instruction. Did you want to use \"ADD {ri} {rj} {rk}\"?"
    );

    let err = Translator::assembly(&set).translate_str("NOP").unwrap_err();
    assert_eq!(err.to_string(), "line 1: \"NOP\" does not match any instruction.");
}

#[test]
fn const8_with_second_word_fields_is_rejected() {
    let set = InstructionSet::parse("3: BAD {ri} {rj} {const8}").unwrap();
    let err = Translator::assembly(&set).translate_str("BAD 1 2 3").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Encoding);
}

#[test]
fn relocation_past_32_bits_keeps_counting() {
    let t = Translator::raw().translate_str("4294967295:\n: 1\n: 2").unwrap();
    let addrs: Vec<u64> = t.words().map(|(a, _)| a).collect();
    assert_eq!(addrs, vec![4_294_967_295, 4_294_967_296]);
    assert!(t.render().contains("4294967296: 2\n"));
}

#[test]
fn relocation_beyond_address_space_is_a_range_error() {
    let set = isa();
    let err = Translator::assembly(&set)
        .translate_str("99999999999999999999999:")
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Range);

    let err = Translator::raw()
        .translate_str("18446744073709551615:\n: 1\n: 2")
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Range);
    assert_eq!(err.to_string(), "line 3: address out of range: \": 2\"");
}
