//! Roster construction and roster files

use std::collections::BTreeSet;
use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};

use sp_core::{Gender, Person, SpResult};

use crate::range::{number_set, parse_leading_int};
use crate::shuffle::shuffled;

/// Marker for "male" in roster files, alongside `m` and `male`
const MALE_MARKER: char = '남';

/// One line of an external roster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub number: u32,
    pub gender: Gender,
}

impl RosterEntry {
    pub fn new(number: u32, gender: Gender) -> Self {
        Self { number, gender }
    }
}

/// How genders are assigned to roster numbers
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LabelingRule {
    /// Odd numbers male, even numbers female
    #[default]
    OddEven,
    /// Numbers in the set are male, everyone else female
    Ranges { male: BTreeSet<u32> },
    /// Roster supplied verbatim, in order
    External { entries: Vec<RosterEntry> },
}

impl LabelingRule {
    /// Build a range rule from male and female range expressions.
    ///
    /// Both lists are parsed but only the male set decides: a number is male
    /// iff it is in the male set. Numbers listed in both are male, numbers
    /// listed in neither are female.
    pub fn from_ranges<M, F, S>(male: M, female: F) -> Self
    where
        M: IntoIterator<Item = S>,
        F: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let female = number_set(female);
        let male = number_set(male);
        log::debug!(
            "range labeling: {} male numbers, {} female numbers (female list unused)",
            male.len(),
            female.len()
        );
        Self::Ranges { male }
    }

    fn gender_of(&self, number: u32) -> Gender {
        let male = match self {
            Self::Ranges { male } => male.contains(&number),
            _ => number % 2 == 1,
        };
        if male { Gender::Male } else { Gender::Female }
    }
}

/// Build the roster for `count` people.
///
/// With `randomize_ids`, a uniformly random permutation of `1..=count`
/// replaces the displayed ids in roster order; genders and original numbers
/// stay with the same people. For an external roster longer than `count`
/// the members past `count` get `count + 1..` in file order, so ids stay
/// unique; a shorter roster uses the first drawn ids only.
pub fn build_roster<R: Rng + ?Sized>(
    count: usize,
    rule: &LabelingRule,
    randomize_ids: bool,
    rng: &mut R,
) -> Vec<Person> {
    let people: Vec<Person> = match rule {
        LabelingRule::External { entries } => entries
            .iter()
            .map(|e| Person::new(e.number, e.gender))
            .collect(),
        _ => (1..=count as u32)
            .map(|n| Person::new(n, rule.gender_of(n)))
            .collect(),
    };

    if !randomize_ids {
        return people;
    }

    let mut numbers = shuffled(&(1..=count as u32).collect::<Vec<_>>(), rng);
    if people.len() > count {
        log::warn!(
            "roster has {} entries for {} configured people; relabeling the tail sequentially",
            people.len(),
            count
        );
        numbers.extend(count as u32 + 1..=people.len() as u32);
    }

    people
        .into_iter()
        .zip(numbers)
        .map(|(person, id)| person.relabeled(id))
        .collect()
}

/// Parse a `<number>, <gender>` roster, one person per line.
///
/// Lines with fewer than two fields or without a leading number are
/// skipped. The gender field is male when it contains the male marker or
/// equals `m`/`male` (case-insensitive); anything else is female.
pub fn parse_roster(content: &str) -> Vec<RosterEntry> {
    content
        .trim()
        .lines()
        .filter_map(|line| {
            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            if fields.len() < 2 {
                return None;
            }
            let number = parse_leading_int(fields[0]).and_then(|n| u32::try_from(n).ok())?;
            Some(RosterEntry::new(number, parse_gender(fields[1])))
        })
        .collect()
}

/// Read and parse a roster file
pub fn load_roster(path: impl AsRef<Path>) -> SpResult<Vec<RosterEntry>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let entries = parse_roster(&content);
    log::debug!("{}: {} roster entries", path.display(), entries.len());
    Ok(entries)
}

fn parse_gender(token: &str) -> Gender {
    let token = token.to_lowercase();
    if token.contains(MALE_MARKER) || token == "m" || token == "male" {
        Gender::Male
    } else {
        Gender::Female
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_odd_even() {
        let roster = build_roster(7, &LabelingRule::OddEven, false, &mut rng());
        assert_eq!(roster.len(), 7);
        for p in &roster {
            assert_eq!(p.gender.is_male(), p.id % 2 == 1);
            assert_eq!(p.id, p.original_number);
        }
    }

    #[test]
    fn test_ranges_male_set_decides() {
        let rule = LabelingRule::from_ranges(["1-3"], ["3-6"]);
        let roster = build_roster(6, &rule, false, &mut rng());
        let males: Vec<u32> = roster
            .iter()
            .filter(|p| p.gender.is_male())
            .map(|p| p.id)
            .collect();
        assert_eq!(males, vec![1, 2, 3]);
    }

    #[test]
    fn test_external_keeps_file_order() {
        let rule = LabelingRule::External {
            entries: vec![
                RosterEntry::new(12, Gender::Female),
                RosterEntry::new(3, Gender::Male),
            ],
        };
        let roster = build_roster(2, &rule, false, &mut rng());
        assert_eq!(roster[0], Person::new(12, Gender::Female));
        assert_eq!(roster[1], Person::new(3, Gender::Male));
    }

    #[test]
    fn test_randomize_relabels_as_permutation() {
        let roster = build_roster(10, &LabelingRule::OddEven, true, &mut rng());
        let mut ids: Vec<u32> = roster.iter().map(|p| p.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, (1..=10).collect::<Vec<_>>());
        for (i, p) in roster.iter().enumerate() {
            assert_eq!(p.original_number, i as u32 + 1);
            assert_eq!(p.gender.is_male(), p.original_number % 2 == 1);
        }
    }

    #[test]
    fn test_randomize_external_longer_than_count() {
        let male = |n: u32| RosterEntry::new(n * 10, Gender::Male);
        let rule = LabelingRule::External {
            entries: (1..=5).map(male).collect(),
        };
        let roster = build_roster(3, &rule, true, &mut rng());
        assert_eq!(roster.len(), 5);
        let mut head: Vec<u32> = roster[..3].iter().map(|p| p.id).collect();
        head.sort_unstable();
        assert_eq!(head, vec![1, 2, 3]);
        assert_eq!(roster[3].id, 4);
        assert_eq!(roster[4].id, 5);
        assert_eq!(roster[4].original_number, 50);
    }

    #[test]
    fn test_randomize_external_shorter_than_count() {
        let entries = vec![
            RosterEntry::new(1, Gender::Male),
            RosterEntry::new(2, Gender::Female),
        ];
        let roster = build_roster(6, &LabelingRule::External { entries }, true, &mut rng());
        assert_eq!(roster.len(), 2);
        assert_ne!(roster[0].id, roster[1].id);
        assert!(roster.iter().all(|p| (1..=6).contains(&p.id)));
    }

    #[test]
    fn test_parse_roster() {
        let content = "1, 남\n2, 여\n3, M\nname, male\n4,Male\n5\n6, f\n";
        let entries = parse_roster(content);
        assert_eq!(
            entries,
            vec![
                RosterEntry::new(1, Gender::Male),
                RosterEntry::new(2, Gender::Female),
                RosterEntry::new(3, Gender::Male),
                RosterEntry::new(4, Gender::Male),
                RosterEntry::new(6, Gender::Female),
            ]
        );
    }

    #[test]
    fn test_parse_empty_roster() {
        assert!(parse_roster("").is_empty());
        assert!(parse_roster("\n\n").is_empty());
    }

    #[test]
    fn test_load_roster_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roster.csv");
        std::fs::write(&path, "1,m\n2,f\n").unwrap();
        let entries = load_roster(&path).unwrap();
        assert_eq!(entries.len(), 2);

        assert!(load_roster(dir.path().join("missing.csv")).is_err());
    }
}
