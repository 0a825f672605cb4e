//! Whole grammars run through parsing and verification.

use ebnf::{parse, scan, verify, Error, Expression, Kind};

const GOOD_GRAMMARS: &[&str] = &[
    "program = .",
    "program = Foo . ; end",
    "program = Foo .",
    "program = A | B C .",
    "program = AtoZ .",
    "program = song .
     song = { note } .
     note = Do | (Re Mi | Fa | So La) | ti .
     ti = Ti .",
    "program=song.song={note}.note=Do|(Re Mi|Fa|So La)|ti.ti=Ti.",
];

const BAD_PARSE: &[&str] = &[
    "program = | .",
    "program = | b .",
    "program = a B ( .",
    "program = A B ] .",
    "program = B } .",
    "program = = .",
    "program = () .",
    "program = [] .",
    "program = {} .",
    "program = song .
     song Do | Ti .",
    "program = song .
     song = { note } .
     note = Do | Ti .
     note = Fa | La .",
    "program = b59$ && foo .",
];

const BAD_VERIFY: &[&str] = &[
    "program = a B .",
    "start = a B .",
    "program = A .
     a = A .",
];

fn dump(src: &str) -> String {
    scan(src.as_bytes())
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

#[test]
fn good_grammars() {
    for src in GOOD_GRAMMARS {
        let (grammar, errors) = parse(src.as_bytes());
        assert!(
            errors.is_empty(),
            "Parse({:?}) failed: {:?}\ntokens: {}",
            src,
            errors,
            dump(src)
        );
        let errors = verify(&grammar, "program");
        assert!(errors.is_empty(), "Verify({:?}) failed: {:?}", src, errors);
    }
}

#[test]
fn bad_parse() {
    for src in BAD_PARSE {
        let (_, errors) = parse(src.as_bytes());
        assert!(
            !errors.is_empty(),
            "Parse({:?}) should have failed\ntokens: {}",
            src,
            dump(src)
        );
        assert!(errors.iter().all(Error::is_syntax), "errors: {:?}", errors);
    }
}

#[test]
fn bad_verify() {
    for src in BAD_VERIFY {
        let (grammar, errors) = parse(src.as_bytes());
        assert!(errors.is_empty(), "Parse({:?}) failed: {:?}", src, errors);
        let errors = verify(&grammar, "program");
        assert!(!errors.is_empty(), "Verify({:?}) should have failed", src);
    }
}

#[test]
fn empty_production() {
    let (g, errors) = parse(b"program = .");
    assert!(errors.is_empty());
    assert_eq!(g.len(), 1);
    assert_eq!(g.get("program").unwrap().expression, None);
    assert!(verify(&g, "program").is_empty());
}

#[test]
fn terminals_are_not_looked_up() {
    let (g, errors) = parse(b"program = A | B C .");
    assert!(errors.is_empty());
    match &g.get("program").unwrap().expression {
        Some(Expression::Alternative(list)) => {
            assert_eq!(list.len(), 2);
            match &list[1] {
                Expression::Sequence(seq) => {
                    assert_eq!(seq.len(), 2);
                    for (e, want) in seq.iter().zip(["B", "C"].iter()) {
                        match e {
                            Expression::Literal(t) => {
                                assert_eq!(t.kind, Kind::Terminal);
                                assert_eq!(t.as_str(), *want);
                            }
                            other => panic!("expected literal, got {:?}", other),
                        }
                    }
                }
                other => panic!("expected sequence, got {:?}", other),
            }
        }
        other => panic!("expected alternative, got {:?}", other),
    }
    assert!(verify(&g, "program").is_empty());
}

#[test]
fn missing_song() {
    let (g, errors) = parse(b"program = song .");
    assert!(errors.is_empty());
    let errors = verify(&g, "program");
    assert_eq!(errors.len(), 1);
    assert!(
        errors[0].to_string().ends_with("missing production \"song\""),
        "got: {}",
        errors[0]
    );
}

#[test]
fn start_must_exist() {
    let (g, errors) = parse(b"program = a B .");
    assert!(errors.is_empty());
    let errors = verify(&g, "someOtherName");
    assert_eq!(
        errors,
        vec![Error::NoStartProduction {
            name: "someOtherName".to_owned()
        }]
    );
}

#[test]
fn stray_close_keeps_production() {
    let (g, errors) = parse(b"program = A B ] .");
    assert!(errors
        .iter()
        .any(|e| matches!(e, Error::Unexpected { found, .. } if found == "END_OPTION")));
    assert!(g.contains("program"));
}

#[test]
fn duplicate_note() {
    let src = "program = song .\n song = { note } .\n note = Do | Ti .\n note = Fa | La .";
    let (g, errors) = parse(src.as_bytes());
    assert!(errors
        .iter()
        .any(|e| matches!(e, Error::DuplicateProduction { name, .. } if name == "note")));
    assert_eq!(g.get("note").unwrap().to_string(), "note = Do | Ti .");
}

#[test]
fn unreachable_count_matches_reached() {
    let src = "program = a .
               a = { b } .
               b = .
               c = d .
               d = c .
               e = E .";
    let (g, errors) = parse(src.as_bytes());
    assert!(errors.is_empty());
    let unreachable: Vec<_> = verify(&g, "program")
        .into_iter()
        .filter_map(|e| match e {
            Error::Unreachable { name, .. } => Some(name),
            _ => None,
        })
        .collect();
    // program, a and b are reached.
    assert_eq!(unreachable.len(), g.len() - 3);
    assert_eq!(unreachable, vec!["c", "d", "e"]);
}
