//! Per-call bookkeeping of which roster members are already seated

use sp_core::Person;

/// Roster indexed by position with a used flag per member.
///
/// Lookups by id resolve to the first roster member carrying that id.
pub(crate) struct SeatPool<'a> {
    roster: &'a [Person],
    used: Vec<bool>,
}

impl<'a> SeatPool<'a> {
    pub fn new(roster: &'a [Person]) -> Self {
        Self {
            roster,
            used: vec![false; roster.len()],
        }
    }

    /// Claim the person with `id` if present and not yet seated
    pub fn claim_id(&mut self, id: u32) -> Option<Person> {
        let index = self.roster.iter().position(|p| p.id == id)?;
        if self.used[index] {
            return None;
        }
        Some(self.claim(index))
    }

    /// Mark roster member `index` as seated
    pub fn claim(&mut self, index: usize) -> Person {
        self.used[index] = true;
        self.roster[index]
    }

    pub fn is_used(&self, index: usize) -> bool {
        self.used[index]
    }

    pub fn person(&self, index: usize) -> &Person {
        &self.roster[index]
    }

    /// Indices of unseated members, roster order
    pub fn unused(&self) -> Vec<usize> {
        (0..self.roster.len()).filter(|&i| !self.used[i]).collect()
    }

    pub fn remaining(&self) -> usize {
        self.used.iter().filter(|&&u| !u).count()
    }

    /// First index in `candidates` not yet seated
    pub fn first_available(&self, candidates: &[usize]) -> Option<usize> {
        candidates.iter().copied().find(|&i| !self.used[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sp_core::Gender;

    #[test]
    fn test_claim_once() {
        let roster = [Person::new(1, Gender::Male), Person::new(2, Gender::Male)];
        let mut pool = SeatPool::new(&roster);
        assert_eq!(pool.claim_id(2).map(|p| p.id), Some(2));
        assert!(pool.claim_id(2).is_none());
        assert!(pool.claim_id(9).is_none());
        assert_eq!(pool.unused(), vec![0]);
        assert_eq!(pool.remaining(), 1);
    }

    #[test]
    fn test_first_available_skips_used() {
        let roster = [
            Person::new(1, Gender::Male),
            Person::new(2, Gender::Male),
            Person::new(3, Gender::Male),
        ];
        let mut pool = SeatPool::new(&roster);
        pool.claim(2);
        assert_eq!(pool.first_available(&[2, 0, 1]), Some(0));
        assert!(pool.is_used(2));
        assert_eq!(pool.person(1).id, 2);
    }
}
