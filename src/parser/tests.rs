#[cfg(test)]
use super::*;
#[cfg(test)]
use super::value::{classify, strip_comments, unescape, ValueKind};

fn parse(input: &str) -> Document {
    let options = ParseOptions::new().origin_exception(true);
    Parser::new(&options).parse(input).expect("Failed to parse input")
}

fn parse_err(input: &str) -> EnvError {
    let options = ParseOptions::new().origin_exception(true);
    Parser::new(&options).parse(input).expect_err("Expected a parse error")
}

fn string(s: &str) -> Value {
    Value::String(s.to_string())
}

#[test]
fn test_simple_values() {
    let doc = parse("TK1=value\nTK2 = value\n  TK3  =  value  \n");

    assert_eq!(doc.len(), 3);
    assert_eq!(doc.get("TK1"), Some(&string("value")));
    assert_eq!(doc.get("TK2"), Some(&string("value")));
    assert_eq!(doc.get("TK3"), Some(&string("value")));
}

#[test]
fn test_double_quoted_values() {
    let input = r#"
TK1="value"
TK2="value \" value"
TK3="value \"value\" value"
TK4="value value"
TK5="value \n value"
TK6="value 'value' value"
TK7="value \n 'value', \"value\" value"
TK8=""
TK9="value" # trailing comment
"#;
    let doc = parse(input);

    assert_eq!(doc.get("TK1"), Some(&string("value")));
    assert_eq!(doc.get("TK2"), Some(&string("value \" value")));
    assert_eq!(doc.get("TK3"), Some(&string("value \"value\" value")));
    assert_eq!(doc.get("TK4"), Some(&string("value value")));
    assert_eq!(doc.get("TK5"), Some(&string("value \n value")));
    assert_eq!(doc.get("TK6"), Some(&string("value 'value' value")));
    assert_eq!(doc.get("TK7"), Some(&string("value \n 'value', \"value\" value")));
    assert_eq!(doc.get("TK8"), Some(&string("")));
    assert_eq!(doc.get("TK9"), Some(&string("value")));
}

#[test]
fn test_single_quoted_values() {
    let input = r#"
TK1='value'
TK2='value \' value'
TK3='value \'value\' value'
TK5='value \n value'
TK7='value \n "value", \'value\' value'
TK8=''
"#;
    let doc = parse(input);

    assert_eq!(doc.get("TK1"), Some(&string("value")));
    assert_eq!(doc.get("TK2"), Some(&string("value ' value")));
    assert_eq!(doc.get("TK3"), Some(&string("value 'value' value")));
    assert_eq!(doc.get("TK5"), Some(&string("value \n value")));
    assert_eq!(doc.get("TK7"), Some(&string("value \n \"value\", 'value' value")));
    assert_eq!(doc.get("TK8"), Some(&string("")));
}

#[test]
fn test_escape_sequences() {
    let doc = parse("A=\"a\\nb\"\nB='it\\'s'\nC=\"hi\\ttab\"\nD=\"keep \\\\ and \\x\"");

    assert_eq!(doc.get("A"), Some(&string("a\nb")));
    assert_eq!(doc.get("B"), Some(&string("it's")));
    assert_eq!(doc.get("C"), Some(&string("hi\ttab")));
    assert_eq!(doc.get("D"), Some(&string("keep \\\\ and \\x")));
}

#[test]
fn test_escaped_quote_at_end_is_not_trimmed() {
    let doc = parse(r#"A="say \"hi\"""#);
    assert_eq!(doc.get("A"), Some(&string("say \"hi\"")));
}

#[test]
fn test_bool_values() {
    let input = "TK1=true\nTK2=false\nTK3=True\nTK4=False\nTK5=YES\nTK6=no\nTK7=yes # on\nTK8=NO";
    let doc = parse(input);

    let expected = [true, false, true, false, true, false, true, false];
    for (i, want) in expected.iter().enumerate() {
        let key = format!("TK{}", i + 1);
        assert_eq!(doc.get(&key), Some(&Value::Bool(*want)), "key {}", key);
    }
}

#[test]
fn test_number_values() {
    let doc = parse("TK1=1\nTK2=1.1\nTK3=\"33 33\"\nTK4=33 33\nTK5=-42\nTK6=+7\nTK7=.5\nTK8=1e3\nTK9=2.5e-1");

    assert_eq!(doc.get("TK1"), Some(&Value::Integer(1)));
    assert_eq!(doc.get("TK2"), Some(&Value::Float(1.1)));
    assert_eq!(doc.get("TK3"), Some(&string("33 33")));
    assert_eq!(doc.get("TK4"), Some(&string("33 33")));
    assert_eq!(doc.get("TK5"), Some(&Value::Integer(-42)));
    assert_eq!(doc.get("TK6"), Some(&Value::Integer(7)));
    assert_eq!(doc.get("TK7"), Some(&Value::Float(0.5)));
    assert_eq!(doc.get("TK8"), Some(&Value::Integer(1000)));
    assert_eq!(doc.get("TK9"), Some(&Value::Float(0.25)));
}

#[test]
fn test_integer_and_float_are_distinct() {
    let doc = parse("A=1\nB=1.0");
    assert_ne!(doc.get("A"), doc.get("B"));
    assert_eq!(doc.get("B"), Some(&Value::Float(1.0)));
}

#[test]
fn test_integer_overflow_becomes_float() {
    let doc = parse("BIG=99999999999999999999");
    assert_eq!(doc.get("BIG"), Some(&Value::Float(1e20)));
}

#[test]
fn test_null_values() {
    let doc = parse("TK1=null\nTK2=#comment\nTK3=\nTK4=   # only a comment\nTK5=Null");

    assert_eq!(doc.get("TK1"), Some(&Value::Null));
    assert_eq!(doc.get("TK2"), Some(&Value::Null));
    assert_eq!(doc.get("TK3"), Some(&Value::Null));
    assert_eq!(doc.get("TK4"), Some(&Value::Null));
    // `null` is case-sensitive
    assert_eq!(doc.get("TK5"), Some(&string("Null")));
}

#[test]
fn test_comments() {
    let input = r#"
# TK0=ignored
TK1=value # comment
TK2=value#comment
   # TK9=also ignored
TK3="value" # comment
TK4=# comment
"#;
    let doc = parse(input);

    assert_eq!(doc.len(), 4);
    assert_eq!(doc.get("TK1"), Some(&string("value")));
    assert_eq!(doc.get("TK2"), Some(&string("value")));
    assert_eq!(doc.get("TK3"), Some(&string("value")));
    assert_eq!(doc.get("TK4"), Some(&Value::Null));
    assert!(!doc.contains_key("TK0"));
    assert!(!doc.contains_key("TK9"));
}

#[test]
fn test_hash_inside_quotes_is_literal() {
    let doc = parse("KEY=\"value # not a comment\"\nOTHER='#tag'");
    assert_eq!(doc.get("KEY"), Some(&string("value # not a comment")));
    assert_eq!(doc.get("OTHER"), Some(&string("#tag")));
}

#[test]
fn test_escaped_hash_in_unquoted_value() {
    let doc = parse("COLOR=\\#ff0000 # red\nCHANNEL=irc\\#rust");
    assert_eq!(doc.get("COLOR"), Some(&string("#ff0000")));
    assert_eq!(doc.get("CHANNEL"), Some(&string("irc#rust")));
}

#[test]
fn test_values_may_contain_equals() {
    let doc = parse("URL=postgres://host/db?sslmode=require\nEQ==");
    assert_eq!(doc.get("URL"), Some(&string("postgres://host/db?sslmode=require")));
    assert_eq!(doc.get("EQ"), Some(&string("=")));
}

#[test]
fn test_variables() {
    let input = r#"
double_1="hey\nhey"
double_2="hello \"hello\" hello"
single_2='hey there!'
single_3='hey there with escaped \' !'
unquoted_1=hello
int_1=1
float_1=3.14
bool_1=true
test_variable_1=${single_2}
test_variable_2="${single_2}/${double_1}"
test_variable_3=${double_1}/hey
test_variable_4="hello ${double_2}"
test_variable_5="${bool_1}"
test_variable_6=${bool_1}
test_variable_7=${bool_1}/${bool_1}
test_variable_9="${int_1}"
test_variable_10=${float_1}/${int_1}
test_variable_13=${int_1}
test_variable_14=${float_1}
test_variable_15=hello ${float_1}
test_variable_16=${single_3}
test_variable_17="${unquoted_1} ${single_3}"
"#;
    let doc = parse(input);

    assert_eq!(doc.get("test_variable_1"), Some(&string("hey there!")));
    assert_eq!(doc.get("test_variable_2"), Some(&string("hey there!/hey\nhey")));
    assert_eq!(doc.get("test_variable_3"), Some(&string("hey\nhey/hey")));
    assert_eq!(doc.get("test_variable_4"), Some(&string("hello hello \"hello\" hello")));
    assert_eq!(doc.get("test_variable_5"), Some(&string("true")));
    assert_eq!(doc.get("test_variable_6"), Some(&Value::Bool(true)));
    assert_eq!(doc.get("test_variable_7"), Some(&string("true/true")));
    assert_eq!(doc.get("test_variable_9"), Some(&string("1")));
    assert_eq!(doc.get("test_variable_10"), Some(&string("3.14/1")));
    assert_eq!(doc.get("test_variable_13"), Some(&Value::Integer(1)));
    assert_eq!(doc.get("test_variable_14"), Some(&Value::Float(3.14)));
    assert_eq!(doc.get("test_variable_15"), Some(&string("hello 3.14")));
    assert_eq!(doc.get("test_variable_16"), Some(&string("hey there with escaped ' !")));
    assert_eq!(doc.get("test_variable_17"), Some(&string("hello hey there with escaped ' !")));
}

#[test]
fn test_variable_clone_propagates_type() {
    let doc = parse("A=true\nB=${A}\nC=value ${A}");
    assert_eq!(doc.get("B"), Some(&Value::Bool(true)));
    assert_eq!(doc.get("C"), Some(&string("value true")));
}

#[test]
fn test_redeclared_key_overwrites_in_place() {
    let doc = parse("A=1\nB=${A}\nA=2\nC=${A}");

    let keys: Vec<&String> = doc.keys().collect();
    assert_eq!(keys, vec!["A", "B", "C"]);
    assert_eq!(doc.get("A"), Some(&Value::Integer(2)));
    assert_eq!(doc.get("B"), Some(&Value::Integer(1)));
    assert_eq!(doc.get("C"), Some(&Value::Integer(2)));
}

#[test]
fn test_forward_reference_fails() {
    let err = parse_err("B=${A}\nA=1");
    match err {
        EnvError::UndefinedVariable { name, line, file, .. } => {
            assert_eq!(name, "A");
            assert_eq!(line, 1);
            assert_eq!(file, STRING_SOURCE);
        }
        other => panic!("Expected UndefinedVariable, got {:?}", other),
    }
}

#[test]
fn test_undefined_variable_in_quotes_fails() {
    let err = parse_err("A=\"x ${NOPE}\"");
    assert!(matches!(err, EnvError::UndefinedVariable { ref name, .. } if name == "NOPE"));
}

#[test]
fn test_invalid_key() {
    let err = parse_err("GOOD=1\nKEY-1=value");
    match err {
        EnvError::InvalidKey { key, line, code, .. } => {
            assert_eq!(key, "KEY-1");
            assert_eq!(line, 2);
            assert_eq!(code, Some(202));
        }
        other => panic!("Expected InvalidKey, got {:?}", other),
    }
}

#[test]
fn test_empty_key_is_invalid() {
    assert!(matches!(parse_err("=value"), EnvError::InvalidKey { .. }));
    assert!(matches!(parse_err("___=value"), EnvError::InvalidKey { .. }));
}

#[test]
fn test_only_key_is_malformed() {
    let err = parse_err("A=1\n\nONLY_KEY");
    match err {
        EnvError::MalformedLine { raw, line, .. } => {
            assert_eq!(raw, "ONLY_KEY");
            assert_eq!(line, 3);
        }
        other => panic!("Expected MalformedLine, got {:?}", other),
    }
}

#[test]
fn test_missing_end_quote() {
    let err = parse_err("A='value\nB=2");
    match err {
        EnvError::UnterminatedString { quote, raw, line, .. } => {
            assert_eq!(quote, '\'');
            assert_eq!(raw, "'value");
            assert_eq!(line, 1);
        }
        other => panic!("Expected UnterminatedString, got {:?}", other),
    }

    let err = parse_err(r#"A="value \""#);
    assert!(matches!(err, EnvError::UnterminatedString { quote: '"', .. }));
}

#[test]
fn test_first_error_aborts_parse() {
    let err = parse_err("A=1\nbad key=1\nC");
    assert!(matches!(err, EnvError::InvalidKey { line: 2, .. }));
}

#[test]
fn test_empty_and_comment_only_documents() {
    assert!(parse("").is_empty());
    assert!(parse("\n\n   \n").is_empty());
    assert!(parse("# one\n   # two\n\n#three=3").is_empty());
}

#[test]
fn test_reparsing_is_deterministic() {
    let input = "A=1\nB=\"${A} two\"\nC=yes\nD=${C}\nE=null\nF=1.5";
    assert_eq!(parse(input), parse(input));
}

#[test]
fn test_order_preservation() {
    let doc = parse("third=3\nfirst=1\nsecond=2");
    let keys: Vec<&String> = doc.keys().collect();
    assert_eq!(keys, vec!["third", "first", "second"]);
}

#[test]
fn test_seed_context_satisfies_references() {
    let options = ParseOptions::new()
        .origin_exception(true)
        .with_context("HOME", "/home/env")
        .with_context("DEBUG", true);

    let doc = Parser::new(&options)
        .parse("CACHE=${HOME}/.cache\nVERBOSE=${DEBUG}\nHOME=/srv\nDATA=${HOME}/data")
        .expect("Failed to parse with seed context");

    assert_eq!(doc.get("CACHE"), Some(&string("/home/env/.cache")));
    assert_eq!(doc.get("VERBOSE"), Some(&Value::Bool(true)));
    assert_eq!(doc.get("DATA"), Some(&string("/srv/data")));
    assert!(!doc.contains_key("DEBUG"));
}

#[test]
fn test_seed_keys_are_not_validated() {
    let options = ParseOptions::new().with_context_map([("my-key", "ok")]);
    let doc = Parser::new(&options).parse("A=${my-key}").expect("Failed to parse");
    assert_eq!(doc.get("A"), Some(&string("ok")));
}

#[test]
fn test_errors_are_opaque_by_default() {
    let options = ParseOptions::default();
    let parser = Parser::new(&options).with_file("app.env");

    let err = parser.parse("KEY-1=value").unwrap_err();
    match &err {
        EnvError::ParseFailed { message, code } => {
            assert_eq!(message, "Key can only contain alphanumeric and underscores: KEY-1");
            assert_eq!(*code, Some(202));
        }
        other => panic!("Expected ParseFailed, got {:?}", other),
    }
    assert_eq!(err.line(), None);
    assert_eq!(err.file(), None);
}

#[test]
fn test_origin_errors_carry_file_raw_and_line() {
    let options = ParseOptions::new().origin_exception(true);
    let parser = Parser::new(&options).with_file("app.env");

    let err = parser.parse("A=1\nB=\"open").unwrap_err();
    assert_eq!(err.file(), Some("app.env"));
    assert_eq!(err.raw(), Some("\"open"));
    assert_eq!(err.line(), Some(2));
    assert!(err.to_string().contains("app.env"));
    assert!(err.to_string().contains("line 2"));
}

#[test]
fn test_key_validator() {
    let loc = Location::new(STRING_SOURCE, 1);

    assert_eq!(key::parse_key("  APP_NAME ", loc), Ok(Key::Valid("APP_NAME")));
    assert_eq!(key::parse_key("  # APP_NAME", loc), Ok(Key::Comment));
    assert!(key::parse_key("", loc).is_err());
    assert!(key::parse_key("A B", loc).is_err());
    assert!(key::parse_key("ÄPFEL", loc).is_err());

    assert!(key::is_valid_key("_LEADING"));
    assert!(key::is_valid_key("lower_123"));
    assert!(!key::is_valid_key("_"));
    assert!(!key::is_valid_key("a.b"));
}

#[test]
fn test_classify_precedence() {
    assert_eq!(classify("\"true\""), (ValueKind::Quoted, "\"true\""));
    assert_eq!(classify("yes # c"), (ValueKind::Bool, "yes"));
    assert_eq!(classify("12 # c"), (ValueKind::Number, "12"));
    assert_eq!(classify("null#c"), (ValueKind::Null, "null"));
    assert_eq!(classify("nullable"), (ValueKind::Unquoted, "nullable"));
    assert_eq!(classify("1.2.3"), (ValueKind::Unquoted, "1.2.3"));
    assert_eq!(classify(""), (ValueKind::Unquoted, ""));
}

#[test]
fn test_strip_comments_and_unescape() {
    assert_eq!(strip_comments("value # c"), "value");
    assert_eq!(strip_comments("a\\#b # c"), "a\\#b");
    assert_eq!(strip_comments("# only"), "");
    assert_eq!(strip_comments("none"), "none");

    assert_eq!(unescape("a\\nb\\tc"), "a\nb\tc");
    assert_eq!(unescape("\\\"q\\\" \\'s\\'"), "\"q\" 's'");
    assert_eq!(unescape("\\\\n"), "\\\n");
    assert_eq!(unescape("trailing\\"), "trailing\\");
}
