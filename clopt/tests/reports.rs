use std::fs;
use std::io::{Seek, SeekFrom, Write};

use clopt::{HelpLayout, Opt, Registry};

fn registry() -> Registry {
    let mut reg = Registry::new();
    reg.define(
        Opt::integer("count", 1)
            .range(0, 10)
            .short('c')
            .description("How many times to repeat.\nMust be between 0 and 10.")
            .show_default(),
    );
    reg.define(Opt::flag("verbose").short('v').description("Report every step."));
    reg.define(Opt::real("ratio", 0.5).description("Blend ratio."));
    reg.define(Opt::string("name", "x").description("Label for the run.").show_default());
    reg
}

#[test]
fn help_goes_to_a_file_sink() {
    let reg = registry();
    let mut file = tempfile::tempfile().unwrap();
    reg.print_options(&mut file).unwrap();
    file.flush().unwrap();
    file.seek(SeekFrom::Start(0)).unwrap();

    let text = std::io::read_to_string(&mut file).unwrap();
    assert_eq!(
        text,
        "  -c COUNT, --count=COUNT\n\
         \x20       How many times to repeat.\n\
         \x20       Must be between 0 and 10. (default: 1)\n\
         \x20 -v, --verbose\n\
         \x20       Report every step.\n\
         \x20 --ratio=RATIO\n\
         \x20       Blend ratio.\n\
         \x20 --name=NAME\n\
         \x20       Label for the run. (default: \"x\")\n"
    );
}

#[test]
fn values_after_parse_go_to_a_named_file() {
    let mut reg = registry();
    reg.process_command_line(["-vc", "3", "--ratio=2.5", "--name='a b'", "rest"])
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("values.txt");
    let mut file = fs::File::create(&path).unwrap();
    reg.print_option_values(&mut file).unwrap();
    reg.print_args(&mut file).unwrap();
    drop(file);

    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(
        text,
        "count:            3\n\
         verbose: TRUE\n\
         ratio:    2.500000E+00\n\
         name: a b\n\
         \x20 1: rest\n"
    );
}

#[test]
fn narrow_layout_hyphenates_long_words() {
    let mut reg = Registry::new();
    reg.define(Opt::flag("x").description("supercalifragilistic"));
    let layout = HelpLayout {
        width: 16,
        synopsis_indent: 0,
        description_indent: 4,
    };
    let mut buf = Vec::new();
    reg.print_options_with(&mut buf, &layout).unwrap();
    assert_eq!(
        String::from_utf8(buf).unwrap(),
        "--x\n    supercalifr-\n    agilistic\n"
    );
}

#[test]
fn usage_marks_required_options() {
    let mut reg = Registry::new();
    reg.define(Opt::string("input", "").required().short('i'));
    reg.define(Opt::flag("quiet").short('q'));
    let mut buf = Vec::new();
    reg.print_usage(&mut buf, "tool", &HelpLayout::default()).unwrap();
    assert_eq!(
        String::from_utf8(buf).unwrap(),
        "Usage: tool -i INPUT|--input=INPUT [-q|--quiet] [ARG...]\n"
    );
}
