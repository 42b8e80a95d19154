//! Pair allocator: two-person team slots with a left/right gender policy
//!
//! Phases, in order:
//!
//! 1. Setup-time seat pins (one or two ids per slot, already-seated ids skipped)
//! 2. Person pins, only into slots that are still empty
//! 3. Main fill: sequential by original number, or gender-aware random
//! 4. Sweep: anyone still unplaced goes into the first slot with room
//!
//! In random mode the left seat of a slot prefers the policy's gender and
//! the right seat prefers the opposite of whoever sits left. Preference
//! never blocks a pairing: when the preferred pool is empty any remaining
//! person is taken.

use rand::Rng;

use sp_core::{
    Gender, LayoutShape, PAIR_SIZE, PairGrid, PairOrder, Person, PinnedPeople, PinnedSeats,
};

use crate::pool::SeatPool;
use crate::shuffle::shuffled;

/// Fills `rows × teams_per_row` pair slots, growing the grid if the roster
/// would not otherwise fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairAllocator {
    pub rows: usize,
    pub teams_per_row: usize,
    pub order: PairOrder,
    pub sequential: bool,
}

impl PairAllocator {
    pub fn new(rows: usize, teams_per_row: usize, order: PairOrder, sequential: bool) -> Self {
        Self {
            rows,
            teams_per_row,
            order,
            sequential,
        }
    }

    /// Slots laid out for a roster of `roster_len` people
    pub fn capacity(&self, roster_len: usize) -> usize {
        LayoutShape::pair(self.rows, self.teams_per_row).capacity_for(roster_len)
    }

    pub fn allocate<R: Rng + ?Sized>(
        &self,
        roster: &[Person],
        pinned_seats: &PinnedSeats,
        pinned_people: &PinnedPeople,
        rng: &mut R,
    ) -> PairGrid {
        let capacity = self.capacity(roster.len());
        let mut slots: Vec<Vec<Person>> = vec![Vec::with_capacity(PAIR_SIZE); capacity];
        let mut pool = SeatPool::new(roster);

        place_seat_pins(&mut slots, &mut pool, pinned_seats);
        place_person_pins(&mut slots, &mut pool, pinned_people);

        if self.sequential {
            fill_sequential(&mut slots, &mut pool);
        } else {
            self.fill_random(&mut slots, &mut pool, rng);
            sweep_unplaced(&mut slots, &mut pool);
        }

        let left_over = pool.remaining();
        if left_over > 0 {
            log::warn!("{} people did not fit in {} pair slots", left_over, capacity);
        }

        PairGrid::from_slots(slots)
    }

    fn fill_random<R: Rng + ?Sized>(
        &self,
        slots: &mut [Vec<Person>],
        pool: &mut SeatPool<'_>,
        rng: &mut R,
    ) {
        let order = shuffled(&pool.unused(), rng);
        let (males, females): (Vec<usize>, Vec<usize>) = order
            .iter()
            .copied()
            .partition(|&i| pool.person(i).gender.is_male());

        for (index, slot) in slots.iter_mut().enumerate() {
            while slot.len() < PAIR_SIZE {
                let preferred = match self.preferred_gender(index, slot) {
                    Some(Gender::Male) => pool.first_available(&males),
                    Some(Gender::Female) => pool.first_available(&females),
                    None => shuffled(&pool.unused(), rng).first().copied(),
                };

                match preferred.or_else(|| pool.first_available(&order)) {
                    Some(i) => slot.push(pool.claim(i)),
                    None => return,
                }
            }
        }
    }

    /// Gender wanted for the next seat of slot `index`, `None` for no preference
    fn preferred_gender(&self, index: usize, slot: &[Person]) -> Option<Gender> {
        let left = match self.order {
            PairOrder::MaleLeft => Gender::Male,
            PairOrder::FemaleLeft => Gender::Female,
            PairOrder::Alternate if index % 2 == 0 => Gender::Male,
            PairOrder::Alternate => Gender::Female,
            PairOrder::Random => return None,
        };
        Some(match slot.first() {
            None => left,
            Some(seated) => seated.gender.opposite(),
        })
    }
}

fn place_seat_pins(slots: &mut [Vec<Person>], pool: &mut SeatPool<'_>, pinned: &PinnedSeats) {
    let total = slots.len();
    for (&index, ids) in pinned {
        let Some(slot) = slots.get_mut(index) else {
            log::warn!("seat pin for slot {} is outside {} pair slots", index, total);
            continue;
        };
        for id in ids.iter() {
            if slot.len() >= PAIR_SIZE {
                break;
            }
            match pool.claim_id(id) {
                Some(person) => slot.push(person),
                None => log::warn!("seat pin {} -> {}: no such unseated person", index, id),
            }
        }
    }
}

fn place_person_pins(slots: &mut [Vec<Person>], pool: &mut SeatPool<'_>, pinned: &PinnedPeople) {
    for (&id, &index) in pinned {
        match slots.get_mut(index) {
            Some(slot) if slot.is_empty() => {
                if let Some(person) = pool.claim_id(id) {
                    slot.push(person);
                }
            }
            _ => log::debug!("person pin {} -> {} skipped", id, index),
        }
    }
}

fn fill_sequential(slots: &mut [Vec<Person>], pool: &mut SeatPool<'_>) {
    let mut order = pool.unused();
    order.sort_by_key(|&i| pool.person(i).sort_key());

    let mut next = order.into_iter();
    'slots: for slot in slots.iter_mut() {
        while slot.len() < PAIR_SIZE {
            match next.next() {
                Some(i) => slot.push(pool.claim(i)),
                None => break 'slots,
            }
        }
    }
}

/// Seat anyone the main pass left out, roster order, ignoring gender
fn sweep_unplaced(slots: &mut [Vec<Person>], pool: &mut SeatPool<'_>) {
    let mut next = pool.unused().into_iter().peekable();
    if next.peek().is_none() {
        return;
    }
    'slots: for slot in slots.iter_mut() {
        while slot.len() < PAIR_SIZE {
            match next.next() {
                Some(i) => {
                    let person = pool.claim(i);
                    log::debug!("sweep placed {} ignoring pair order", person.id);
                    slot.push(person);
                }
                None => break 'slots,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use sp_core::PinnedIds;

    use crate::roster::{LabelingRule, RosterEntry, build_roster};

    fn roster(count: usize) -> Vec<Person> {
        let mut rng = StdRng::seed_from_u64(0);
        build_roster(count, &LabelingRule::OddEven, false, &mut rng)
    }

    fn slot_ids(slot: &[Person]) -> Vec<u32> {
        slot.iter().map(|p| p.id).collect()
    }

    fn ids(grid: &PairGrid) -> Vec<Vec<u32>> {
        grid.slots().iter().map(|s| slot_ids(s)).collect()
    }

    fn no_pins() -> (PinnedSeats, PinnedPeople) {
        (PinnedSeats::new(), PinnedPeople::new())
    }

    #[test]
    fn test_sequential_ignores_gender() {
        let (seats, people) = no_pins();
        let alloc = PairAllocator::new(2, 2, PairOrder::MaleLeft, true);
        let mut rng = StdRng::seed_from_u64(1);
        let grid = alloc.allocate(&roster(8), &seats, &people, &mut rng);
        assert_eq!(
            ids(&grid),
            vec![vec![1, 2], vec![3, 4], vec![5, 6], vec![7, 8]]
        );
    }

    #[test]
    fn test_capacity_grows_to_fit_roster() {
        let (seats, people) = no_pins();
        let alloc = PairAllocator::new(1, 2, PairOrder::MaleLeft, true);
        let mut rng = StdRng::seed_from_u64(1);
        let grid = alloc.allocate(&roster(7), &seats, &people, &mut rng);
        assert_eq!(grid.capacity(), 4);
        assert_eq!(grid.placed_count(), 7);
        assert_eq!(ids(&grid)[3], vec![7]);
    }

    #[test]
    fn test_empty_slots_preserved() {
        let (seats, people) = no_pins();
        let alloc = PairAllocator::new(3, 2, PairOrder::Random, false);
        let mut rng = StdRng::seed_from_u64(4);
        let grid = alloc.allocate(&roster(5), &seats, &people, &mut rng);
        assert_eq!(grid.capacity(), 6);
        assert_eq!(grid.placed_count(), 5);
        assert!(grid.slots()[3..].iter().all(Vec::is_empty));
    }

    #[test]
    fn test_male_left_balanced_roster() {
        let (seats, people) = no_pins();
        let alloc = PairAllocator::new(1, 4, PairOrder::MaleLeft, false);
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let grid = alloc.allocate(&roster(8), &seats, &people, &mut rng);
            for slot in grid.slots() {
                assert_eq!(slot.len(), 2);
                assert_eq!(slot[0].gender, Gender::Male);
                assert_eq!(slot[1].gender, Gender::Female);
            }
        }
    }

    #[test]
    fn test_female_left_balanced_roster() {
        let (seats, people) = no_pins();
        let alloc = PairAllocator::new(2, 2, PairOrder::FemaleLeft, false);
        let mut rng = StdRng::seed_from_u64(9);
        let grid = alloc.allocate(&roster(8), &seats, &people, &mut rng);
        for slot in grid.slots() {
            assert_eq!(slot[0].gender, Gender::Female);
            assert_eq!(slot[1].gender, Gender::Male);
        }
    }

    #[test]
    fn test_alternate_flips_by_slot() {
        let (seats, people) = no_pins();
        let alloc = PairAllocator::new(1, 4, PairOrder::Alternate, false);
        let mut rng = StdRng::seed_from_u64(2);
        let grid = alloc.allocate(&roster(8), &seats, &people, &mut rng);
        for (index, slot) in grid.slots().iter().enumerate() {
            let left = if index % 2 == 0 {
                Gender::Male
            } else {
                Gender::Female
            };
            assert_eq!(slot[0].gender, left);
            assert_eq!(slot[1].gender, left.opposite());
        }
    }

    #[test]
    fn test_same_gender_pairs_when_needed() {
        let male = |n| RosterEntry::new(n, Gender::Male);
        let rule = LabelingRule::External {
            entries: (1..=6).map(male).collect(),
        };
        let mut rng = StdRng::seed_from_u64(3);
        let people = build_roster(6, &rule, false, &mut rng);
        let (seats, pins) = no_pins();
        let alloc = PairAllocator::new(1, 3, PairOrder::FemaleLeft, false);
        let grid = alloc.allocate(&people, &seats, &pins, &mut rng);
        assert!(grid.slots().iter().all(|s| s.len() == 2));
    }

    #[test]
    fn test_seat_pins_one_or_two() {
        let mut seats = PinnedSeats::new();
        seats.insert(1, PinnedIds::two(4, 8));
        seats.insert(2, PinnedIds::one(5));
        let alloc = PairAllocator::new(2, 2, PairOrder::MaleLeft, false);
        let mut rng = StdRng::seed_from_u64(6);
        for _ in 0..5 {
            let grid = alloc.allocate(&roster(8), &seats, &PinnedPeople::new(), &mut rng);
            assert_eq!(ids(&grid)[1], vec![4, 8]);
            assert_eq!(grid.slots()[2][0].id, 5);
            assert_eq!(grid.placed_count(), 8);
        }
    }

    #[test]
    fn test_seat_pin_skips_already_used() {
        let mut seats = PinnedSeats::new();
        seats.insert(0, PinnedIds::two(3, 3));
        seats.insert(1, PinnedIds::two(3, 6));
        let alloc = PairAllocator::new(1, 3, PairOrder::MaleLeft, true);
        let mut rng = StdRng::seed_from_u64(1);
        let grid = alloc.allocate(&roster(6), &seats, &PinnedPeople::new(), &mut rng);
        assert_eq!(ids(&grid), vec![vec![3, 1], vec![6, 2], vec![4, 5]]);
    }

    #[test]
    fn test_person_pin_needs_empty_slot() {
        let mut seats = PinnedSeats::new();
        seats.insert(0, PinnedIds::one(1));
        let mut people = PinnedPeople::new();
        people.insert(2, 0);
        people.insert(3, 2);
        people.insert(4, 2);
        let alloc = PairAllocator::new(1, 3, PairOrder::MaleLeft, true);
        let mut rng = StdRng::seed_from_u64(1);
        let grid = alloc.allocate(&roster(6), &seats, &people, &mut rng);
        // 2 loses to the seat pin, 4 loses to 3 in slot 2
        assert_eq!(ids(&grid), vec![vec![1, 2], vec![4, 5], vec![3, 6]]);
    }

    #[test]
    fn test_pinned_person_not_duplicated() {
        let mut seats = PinnedSeats::new();
        seats.insert(0, PinnedIds::one(1));
        let mut people = PinnedPeople::new();
        people.insert(1, 2);
        let alloc = PairAllocator::new(1, 3, PairOrder::Random, false);
        let mut rng = StdRng::seed_from_u64(8);
        let grid = alloc.allocate(&roster(6), &seats, &people, &mut rng);
        assert_eq!(grid.people().filter(|p| p.id == 1).count(), 1);
        assert_eq!(grid.position_of(1), Some(0));
    }

    #[test]
    fn test_pinned_partner_gets_opposite_gender() {
        let mut seats = PinnedSeats::new();
        seats.insert(0, PinnedIds::one(2));
        let alloc = PairAllocator::new(1, 2, PairOrder::MaleLeft, false);
        let mut rng = StdRng::seed_from_u64(5);
        let grid = alloc.allocate(&roster(4), &seats, &PinnedPeople::new(), &mut rng);
        let slot = &grid.slots()[0];
        assert_eq!(slot[0].id, 2);
        assert_eq!(slot[1].gender, Gender::Male);
    }

    #[test]
    fn test_random_order_places_everyone() {
        let (seats, people) = no_pins();
        let alloc = PairAllocator::new(2, 3, PairOrder::Random, false);
        let mut rng = StdRng::seed_from_u64(12);
        let grid = alloc.allocate(&roster(11), &seats, &people, &mut rng);
        let mut placed: Vec<u32> = grid.people().map(|p| p.id).collect();
        placed.sort_unstable();
        assert_eq!(placed, (1..=11).collect::<Vec<_>>());
    }

    #[test]
    fn test_sweep_fills_first_open_slots_in_roster_order() {
        let people = roster(5);
        let mut slots = vec![vec![people[0], people[1]], vec![people[2]], vec![]];
        let mut pool = SeatPool::new(&people);
        for i in 0..3 {
            pool.claim(i);
        }
        sweep_unplaced(&mut slots, &mut pool);
        let got: Vec<Vec<u32>> = slots.iter().map(|s| slot_ids(s)).collect();
        assert_eq!(got, vec![vec![1, 2], vec![3, 4], vec![5]]);
        assert_eq!(pool.remaining(), 0);
    }
}
