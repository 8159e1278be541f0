use arch::ErrorKind;
use pyrite::hooks::{console::Console, trace::Trace};
use pyrite::{Error, Fault, State};

fn container(code: &str) -> Vec<u8> {
    let (_, bin) = pyasm::build("test.pyasm", code).unwrap();
    bin
}

fn run_bin(bin: &[u8], tmax: Option<u64>) -> (Result<u64, Error>, String) {
    let mut state = State::load(bin).unwrap();
    let mut out = Vec::new();
    let mut console = Console::new(&mut out);
    let result = pyrite::run(&mut state, &mut [&mut console], tmax);
    (result, String::from_utf8(out).unwrap())
}

fn run(code: &str) -> (Result<u64, Error>, String) {
    run_bin(&container(code), None)
}

fn fault(code: &str) -> Fault {
    match run(code).0 {
        Err(Error::Fault(fault)) => fault,
        other => panic!("expected a fault, got {:?}", other),
    }
}

#[test]
fn add_and_print() {
    let (result, out) = run("@segment code\nipush 3\nipush 4\niadd\nprint\nhalt");
    assert_eq!(result.unwrap(), 5);
    assert_eq!(out, "7\n");
}

#[test]
fn print_formats() {
    let code = "@segment readonly\nhalf: 0.5\n@segment code\n\
                dpush 2.0 dpush half dadd print\n\
                ipush 2 ipush 9 isub print\n\
                here: ppush here print";
    let (result, out) = run(code);
    result.unwrap();
    // four 9-byte pushes and four 1-byte instructions precede `here`
    assert_eq!(out, "2.500000\n-7\n0x28\n");
}

#[test]
fn deterministic() {
    let bin = container("@segment code\nipush 6\nipush 7\nimul\nprint\ndpush 1.5\nprint");
    assert_eq!(run_bin(&bin, None).1, run_bin(&bin, None).1);
    assert_eq!(run_bin(&bin, None).1, "42\n1.500000\n");
}

#[test]
fn runs_off_the_end() {
    let (result, out) = run("@segment code\nipush 1\nprint");
    assert_eq!(result.unwrap(), 2);
    assert_eq!(out, "1\n");
}

#[test]
fn halt_stops_execution() {
    let (_, out) = run("@segment code\nhalt\nipush 1\nprint");
    assert_eq!(out, "");
}

#[test]
fn tmax_bounds_steps() {
    let bin = container("@segment code\nipush 1\nprint\nipush 2\nprint");
    let (result, out) = run_bin(&bin, Some(2));
    assert_eq!(result.unwrap(), 2);
    assert_eq!(out, "1\n");
}

#[test]
fn empty_body() {
    let bin = arch::binary::encode(&[]).unwrap();
    let (result, out) = run_bin(&bin, None);
    assert_eq!(result.unwrap(), 0);
    assert_eq!(out, "");
}

#[test]
fn bad_magic() {
    let mut bin = container("@segment code\nhalt");
    bin[0] = b'X';
    assert_eq!(
        State::load(&bin).err(),
        Some(arch::binary::Error::BadMagic)
    );
}

#[test]
fn missing_file() {
    let error = State::load_file("does/not/exist.pyrite").err().unwrap();
    assert_eq!(error.kind(), ErrorKind::Io);
}

#[test]
fn pop_on_empty_stack() {
    assert!(matches!(
        fault("@segment code\npop"),
        Fault::StackUnderflow { addr: 0, .. }
    ));
}

#[test]
fn arithmetic_needs_two_operands() {
    assert!(matches!(
        fault("@segment code\nipush 1\niadd"),
        Fault::StackUnderflow { addr: 9, .. }
    ));
}

#[test]
fn division_by_zero() {
    assert_eq!(
        fault("@segment code\nipush 1\nipush 0\nidiv"),
        Fault::DivisionByZero { addr: 18 }
    );
}

#[test]
fn double_division_by_zero() {
    let (result, out) = run("@segment code\ndpush 1.0\ndpush 0.0\nddiv\nprint");
    result.unwrap();
    assert_eq!(out, "inf\n");
}

#[test]
fn type_mismatch() {
    let code = "@segment code\nipush 1\nipush 2\ndadd";
    assert!(matches!(fault(code), Fault::TypeMismatch { .. }));
    let (result, _) = run(code);
    assert_eq!(result.unwrap_err().kind(), ErrorKind::Runtime);
}

#[test]
fn wrapping_overflow() {
    let (_, out) = run("@segment code\nipush 9223372036854775807\nipush 1\niadd\nprint");
    assert_eq!(out, "-9223372036854775808\n");
}

#[test]
fn unknown_opcode() {
    let bin = arch::binary::encode(&[0x45]).unwrap();
    let (result, _) = run_bin(&bin, None);
    assert!(matches!(result, Err(Error::Fault(Fault::Decode(_)))));
}

// drop ANSI colour sequences
fn plain(text: &str) -> String {
    let mut out = String::new();
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch == '\x1b' {
            for ch in chars.by_ref() {
                if ch == 'm' {
                    break;
                }
            }
        } else {
            out.push(ch);
        }
    }
    out
}

#[test]
fn trace_lists_each_step() {
    let mut state = State::load(&container("@segment code\nipush 3\nprint\nhalt")).unwrap();
    let mut out = Vec::new();
    let mut trace = Trace::new(&mut out);
    assert_eq!(pyrite::run(&mut state, &mut [&mut trace], None).unwrap(), 3);

    let text = plain(&String::from_utf8(out).unwrap());
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0], " * Trace: 11 bytes");
    assert!(lines[1].starts_with("[0000] 0000: ipush 3"));
    assert!(lines[1].ends_with("depth 1"));
    assert!(lines[2].starts_with("[0001] 0009: print"));
    assert!(lines[2].ends_with("depth 0"));
    assert!(lines[3].starts_with("[0002] 000A: halt"));
    assert_eq!(lines[4], " * Trace: stopped at 000B");
}
