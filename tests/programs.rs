use std::fs;

use walkdir::WalkDir;
use water::run;

/// Separates a program from its expected output in `tests/programs/*.wtr`.
const SEPARATOR: &str = "\n###########################################################\n\n";

/// Runs a program the way the command line does: results first, then the
/// error (if any) on its own line after an `ERROR: ` prefix.
fn combined_output(src: &str) -> String {
    let mut output = Vec::new();
    let result = run(src, &mut output);
    let mut text = String::from_utf8(output).expect("output is UTF-8");
    if let Err(e) = result {
        text.push_str(&format!("ERROR: {e}\n"));
    }
    text
}

#[test]
fn golden_programs() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/programs").sort_by_file_name()
                                      .into_iter()
                                      .filter_map(Result::ok)
                                      .filter(|e| e.path().extension().is_some_and(|ext| ext == "wtr"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        let Some((program, expected)) = content.split_once(SEPARATOR) else {
            panic!("{path:?} doesn't have the expected output section");
        };

        count += 1;
        let output = combined_output(program);
        assert_eq!(output, expected, "bad output in the {path:?} program");
    }

    assert!(count > 0, "No programs found in tests/programs");
}
