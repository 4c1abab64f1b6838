// tests/template_learning.rs
//
// End-to-end template induction through the public API: learn samples,
// render, extract, and round-trip the brain through its blob form.
//
use pagemine::error::MineError;
use pagemine::template::Template;

const MARKER: &str = "{{ HOLE }}";

#[test]
fn disjoint_samples_collapse_to_one_hole() {
    let mut t = Template::new();
    t.learn("1");
    t.learn("2");
    assert_eq!(t.num_holes(), 1);
    assert_eq!(t.as_text(MARKER), MARKER);
}

#[test]
fn learning_the_same_sample_twice_is_idempotent() {
    let mut t = Template::new();
    t.learn("<b>static page</b>");
    t.learn("<b>static page</b>");
    assert_eq!(t.num_holes(), 0);
    assert_eq!(t.as_text(MARKER), "<b>static page</b>");
}

#[test]
fn extraction_returns_one_capture_per_hole() {
    let mut t = Template::new();
    t.learn("<p>Price: 10 dollars</p>");
    t.learn("<p>Price: 25 dollars</p>");
    assert_eq!(t.num_holes(), 1);
    let got = t.extract("<p>Price: 99 dollars</p>").unwrap();
    assert_eq!(got, vec!["99".to_string()]);
}

#[test]
fn variable_greeting_is_captured_and_mismatch_rejected() {
    let mut t = Template::new();
    t.learn("Hello Bob, bye");
    t.learn("Hello Sue, bye");
    assert_eq!(t.extract("Hello Ann, bye").unwrap(), vec!["Ann".to_string()]);
    assert!(matches!(
        t.extract("Goodbye Ann, bye"),
        Err(MineError::NoMatch)
    ));
}

#[test]
fn zero_hole_match_is_not_a_failure() {
    let mut t = Template::new();
    t.learn("fixed");
    let got = t.extract("fixed").unwrap();
    assert!(got.is_empty());
    assert!(matches!(t.extract("other"), Err(MineError::NoMatch)));
}

#[test]
fn unlearned_template_refuses_to_extract() {
    let t = Template::new();
    assert!(matches!(t.extract("anything"), Err(MineError::Unlearned)));
}

#[test]
fn brain_blob_round_trips_through_a_fresh_template() {
    let mut t = Template::new();
    t.learn("id=381 name=BOB");
    t.learn("id=52 name=SUE");
    let blob = t.brain().unwrap().serialize().unwrap();

    let reloaded = Template::from_serialized(&blob).unwrap();
    assert_eq!(reloaded.brain(), t.brain());
    assert_eq!(
        reloaded.extract("id=7 name=WOMBAT").unwrap(),
        vec!["7".to_string(), "WOMBAT".to_string()]
    );
}

#[test]
fn corrupt_blob_is_rejected() {
    assert!(Template::from_serialized("not a brain").is_err());
}

#[test]
fn learning_continues_after_reload() {
    let mut t = Template::new();
    t.learn("row A");
    let blob = t.brain().unwrap().serialize().unwrap();

    let mut t2 = Template::from_serialized(&blob).unwrap();
    t2.learn("row B");
    assert_eq!(t2.num_holes(), 1);
    assert_eq!(t2.extract("row C").unwrap(), vec!["C".to_string()]);
}
