//! Grouping of parsed cards for browsing.

use std::collections::HashMap;

use crate::types::{Card, TopicGroup};

/// Group cards by topic.
///
/// Topics keep the order of their first appearance; cards keep document
/// order inside each topic, even when a topic reappears later in the list.
pub fn group_by_topic(cards: &[Card]) -> Vec<TopicGroup> {
    let mut groups: Vec<TopicGroup> = Vec::new();
    let mut slots: HashMap<&str, usize> = HashMap::new();

    for card in cards {
        let slot = *slots.entry(card.topic.as_str()).or_insert_with(|| {
            groups.push(TopicGroup {
                topic: card.topic.clone(),
                cards: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].cards.push(card.clone().into());
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TermCard;
    use pretty_assertions::assert_eq;

    fn card(topic: &str, term: &str) -> Card {
        Card {
            topic: topic.to_string(),
            term: term.to_string(),
            details: vec![format!("- {} detail", term)],
        }
    }

    fn term(term: &str) -> TermCard {
        TermCard {
            term: term.to_string(),
            details: vec![format!("- {} detail", term)],
        }
    }

    #[test]
    fn groups_in_first_appearance_order() {
        let cards = vec![card("B", "b1"), card("A", "a1"), card("B", "b2")];
        let groups = group_by_topic(&cards);
        assert_eq!(
            groups,
            vec![
                TopicGroup {
                    topic: "B".to_string(),
                    cards: vec![term("b1"), term("b2")],
                },
                TopicGroup {
                    topic: "A".to_string(),
                    cards: vec![term("a1")],
                },
            ]
        );
    }

    #[test]
    fn empty_input_has_no_groups() {
        assert!(group_by_topic(&[]).is_empty());
    }

    #[test]
    fn duplicate_terms_stay_separate() {
        let cards = vec![card("A", "x"), card("A", "x")];
        let groups = group_by_topic(&cards);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].cards.len(), 2);
    }
}
