//! Single-seat allocator: one person per seat

use rand::Rng;

use sp_core::{Person, PinnedPeople, PinnedSeats, SingleGrid};

use crate::pool::SeatPool;
use crate::shuffle::shuffled;

/// Fills a flat run of `capacity` seats.
///
/// Precedence is fixed: setup-time seat pins first, then person pins into
/// seats still empty, then everyone else in sequential or shuffled order.
/// Seats left over stay empty; people left over are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SingleSeatAllocator {
    pub capacity: usize,
    pub sequential: bool,
}

impl SingleSeatAllocator {
    pub fn new(capacity: usize, sequential: bool) -> Self {
        Self {
            capacity,
            sequential,
        }
    }

    pub fn allocate<R: Rng + ?Sized>(
        &self,
        roster: &[Person],
        pinned_seats: &PinnedSeats,
        pinned_people: &PinnedPeople,
        rng: &mut R,
    ) -> SingleGrid {
        let mut seats: Vec<Option<Person>> = vec![None; self.capacity];
        let mut pool = SeatPool::new(roster);

        for (&seat, ids) in pinned_seats {
            if seat >= seats.len() {
                log::warn!("seat pin {} is outside {} seats", seat, seats.len());
                continue;
            }
            let id = ids.first();
            match pool.claim_id(id) {
                Some(person) => seats[seat] = Some(person),
                None => log::warn!("seat pin {} -> {}: no such unseated person", seat, id),
            }
        }

        for (&id, &seat) in pinned_people {
            if seat >= seats.len() || seats[seat].is_some() {
                log::debug!("person pin {} -> {} skipped", id, seat);
                continue;
            }
            if let Some(person) = pool.claim_id(id) {
                seats[seat] = Some(person);
            }
        }

        let unseated = pool.unused();
        let mut remaining: Vec<Person> = unseated.iter().map(|&i| *pool.person(i)).collect();
        if self.sequential {
            remaining.sort_by_key(Person::sort_key);
        } else {
            remaining = shuffled(&remaining, rng);
        }

        let mut next = remaining.into_iter();
        for seat in seats.iter_mut().filter(|s| s.is_none()) {
            match next.next() {
                Some(person) => *seat = Some(person),
                None => break,
            }
        }

        let dropped = next.count();
        if dropped > 0 {
            log::warn!("{} people did not fit in {} seats", dropped, self.capacity);
        }

        SingleGrid::from_seats(seats)
    }
}
