use pyasm::util::print_dump;

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

fn dump(code: &str) -> Vec<String> {
    let (assembled, _) = pyasm::build("test.pyasm", code).unwrap();
    let mut out = Vec::new();
    print_dump(&mut out, "test.pyasm", code, &assembled).unwrap();
    let text = plain(&String::from_utf8(out).unwrap());
    println!("{}", text);
    text.lines().map(str::to_string).collect()
}

fn find(lines: &[String], prefix: &str) -> usize {
    lines
        .iter()
        .position(|line| line.starts_with(prefix))
        .unwrap_or_else(|| panic!("no line starting with {:?}", prefix))
}

#[test]
fn listing() {
    let lines = dump("@segment readonly\nx: 42\n@segment code\nipush x\nmain:\nprint\nhalt");
    let gutter = " ".repeat(35);

    assert!(lines[0].ends_with("+------[readonly]"));
    assert_eq!(lines[1], format!("{}| x = 42", gutter));
    assert!(lines[2].ends_with("+------[test.pyasm]"));
    assert_eq!(lines[3], format!("{}|    1: @segment readonly", gutter));

    let ipush = &lines[find(&lines, "[0000]")];
    assert!(ipush.starts_with("[0000] 01 2A 00 00 00 00 00 00 00 |    4:"));
    assert!(ipush.ends_with("ipush 42"));

    let print = find(&lines, "[0009]");
    assert_eq!(lines[print - 1], format!("{}| main:", gutter));
    assert!(lines[print].starts_with("[0009] 05"));
    assert!(lines[print].contains("|    6:   print"));

    assert!(lines[find(&lines, "[000A]")].contains("halt"));
}

#[test]
fn no_readonly_block_without_data() {
    let lines = dump("@segment code\nhalt");
    assert!(lines[0].ends_with("+------[test.pyasm]"));
    assert!(lines.iter().all(|line| !line.contains("[readonly]")));
}
