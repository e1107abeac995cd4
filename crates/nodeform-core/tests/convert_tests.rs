//! Stock name converter behavior.

use nodeform_core::convert::{all_caps, all_lower, camel_case, kebab_case, pascal_case, snake_case};

#[test]
fn pascal_case_joins_capitalized_words() {
    assert_eq!(pascal_case("log_level"), "LogLevel");
    assert_eq!(pascal_case("write-to-file"), "WriteToFile");
    assert_eq!(pascal_case("already Pascal"), "AlreadyPascal");
}

#[test]
fn camel_case_lowers_the_first_word() {
    assert_eq!(camel_case("log_level"), "logLevel");
    assert_eq!(camel_case("MaxDepth"), "maxDepth");
}

#[test]
fn snake_case_joins_lowercased_words() {
    assert_eq!(snake_case("LogLevel"), "log_level");
    assert_eq!(snake_case("write-to-file"), "write_to_file");
}

#[test]
fn kebab_case_joins_lowercased_words() {
    assert_eq!(kebab_case("LogLevel"), "log-level");
    assert_eq!(kebab_case("max_depth"), "max-depth");
}

#[test]
fn all_caps_and_all_lower_collapse_word_boundaries() {
    assert_eq!(all_caps("log_level"), "LOGLEVEL");
    assert_eq!(all_lower("Log-Level"), "loglevel");
}

#[test]
fn acronym_runs_split_before_their_last_capital() {
    assert_eq!(snake_case("XMLFile"), "xml_file");
    assert_eq!(pascal_case("XMLFile"), "XmlFile");
    assert_eq!(camel_case("HTTPServer"), "httpServer");
}

#[test]
fn digits_stay_attached_to_their_word() {
    assert_eq!(snake_case("Max2Depth"), "max2_depth");
    assert_eq!(pascal_case("depth2"), "Depth2");
}

#[test]
fn numeric_and_degenerate_names_pass_through() {
    assert_eq!(pascal_case("0"), "0");
    assert_eq!(snake_case("0"), "0");
    assert_eq!(pascal_case(""), "");
}
