//! Test fixtures: sample outline documents.

/// Wrap outline markup in an OPML document with the given title.
pub fn opml(title: &str, body: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <opml version=\"2.0\"><head><title>{}</title></head><body>{}</body></opml>",
        title, body
    )
}

/// One topic, one term, two details.
pub fn cardiology_deck() -> String {
    opml(
        "Cardiology",
        r#"<outline text="Cardiology">
             <outline text="MI">
               <outline text="Causes"/>
               <outline text="Symptoms"/>
             </outline>
           </outline>"#,
    )
}

/// Two topics with interleaved terms, plus entries that yield no card.
pub fn mixed_deck() -> String {
    opml(
        "Mixed",
        r#"<outline text="Cardiology">
             <outline text="Shock"><outline text="cardiogenic"/></outline>
             <outline text="No details"/>
           </outline>
           <outline text="Infectious disease">
             <outline text="Shock"><outline text="septic"/></outline>
             <outline text="Sepsis">
               <outline text=""><outline text="qSOFA"/></outline>
             </outline>
           </outline>
           <outline text="Cardiology">
             <outline text="Angina"><outline text="stable"/></outline>
           </outline>"#,
    )
}

/// Generate a deck with `topics` topics of `terms` cards each.
pub fn generated_deck(topics: usize, terms: usize) -> String {
    let body: String = (0..topics)
        .map(|t| {
            let cards: String = (0..terms)
                .map(|i| {
                    format!(
                        r#"<outline text="Term {t}.{i}"><outline text="Detail {t}.{i}"/></outline>"#
                    )
                })
                .collect();
            format!(r#"<outline text="Topic {t}">{cards}</outline>"#)
        })
        .collect();
    opml("Generated", &body)
}

/// Document with an unclosed tag.
pub fn malformed_deck() -> String {
    "<opml version=\"2.0\"><body><outline text=\"Topic\"><outline text=\"Term\"></body></opml>"
        .to_string()
}
