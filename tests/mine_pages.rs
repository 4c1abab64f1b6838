// tests/mine_pages.rs
//
// End-to-end page mining: two pages rendered from the same site template,
// differing only in their story content.
//
use pagemine::dom::parse_html;
use pagemine::mine::mine_page;
use pagemine::strip::strip_template;

fn page(headline: &str, story: &str) -> String {
    format!(
        concat!(
            "<html><head><title>The Daily Example</title></head><body>",
            "<div id=\"nav\"><a href=\"/\">Home</a> | <a href=\"/archive\">Archive</a></div>",
            "<h1>{}</h1>",
            "<div class=\"story\">{}</div>",
            "<div id=\"footer\">Copyright 2008 Example Media</div>",
            "</body></html>"
        ),
        headline, story
    )
}

#[test]
fn shared_chrome_is_stripped_and_story_text_survives() {
    let subject = page("Dog bites man", "<p>It happened on Tuesday.</p>");
    let other = page("Man bites dog", "<p>Entirely different text.</p>");
    let got = mine_page(&subject, &[other.as_str()]);
    assert_eq!(
        got,
        vec![
            "Dog bites man".to_string(),
            "It happened on Tuesday.".to_string(),
        ]
    );
}

#[test]
fn more_references_remove_more_boilerplate() {
    let subject = page(
        "Quakes rattle city",
        "<p>Residents felt three tremors.</p><p>Breaking news update</p>",
    );
    let one = page("Quiet day downtown", "<p>Residents felt three tremors.</p>");
    let two = page("Weather stays mild", "<p>Breaking news update</p>");

    // The first reference shares one story paragraph, the second shares the
    // other; only the headline is unique to the subject everywhere.
    let got = mine_page(&subject, &[one.as_str(), two.as_str()]);
    assert_eq!(got, vec!["Quakes rattle city".to_string()]);
}

#[test]
fn unique_block_is_cleaned_before_serialization() {
    let subject = page(
        "Hdr",
        "<p>Same story.</p><div class=\"promo\"><img src=\"x.gif\"><b>Subscribe today</b></div>",
    );
    let other = page("Hdr", "<p>Same story.</p>");
    let got = mine_page(&subject, &[other.as_str()]);
    // The promo survives as markup, minus decorative tags and attributes.
    assert_eq!(got, vec!["<div>Subscribe today</div>".to_string()]);
}

#[test]
fn script_and_style_content_never_surfaces() {
    let subject = "<body><script>var x = 'abc';</script><p>real words</p></body>";
    let other = "<body><script>var x = 'xyz';</script><p>other words</p></body>";
    let got = mine_page(subject, &[other]);
    assert_eq!(got, vec!["real words".to_string()]);
}

#[test]
fn identical_pages_mine_nothing() {
    let subject = page("Same", "<p>Same everywhere.</p>");
    let copy = subject.clone();
    assert!(mine_page(&subject, &[copy.as_str()]).is_empty());
}

#[test]
fn strip_template_counts_removed_pairs() {
    let mut a = parse_html(&page("A", "<p>x</p>"));
    let mut b = parse_html(&page("B", "<p>y</p>"));
    let removed = strip_template(&mut a, &mut b, true);
    assert!(removed >= 3); // head, nav and footer at minimum
    let html = a.to_html(a.root());
    assert!(html.contains("<h1>A</h1>"));
    assert!(!html.contains("Copyright"));
    assert!(!html.contains("Archive"));
}
