//! Orb placement, respawning and collection.

use orb_maze_core::{CellCoord, MazeError, OrbId};
use rand::Rng;

use crate::{maze::MazeGrid, positions};

/// Timed pickup sitting on an open cell.
#[derive(Clone, Debug, PartialEq)]
pub struct Orb {
    id: OrbId,
    cell: CellCoord,
    time_reward: f32,
    time_penalty: f32,
    alive: bool,
}

impl Orb {
    /// Identifier allocated when the orb was spawned.
    #[must_use]
    pub const fn id(&self) -> OrbId {
        self.id
    }

    /// Cell the orb currently occupies.
    #[must_use]
    pub const fn cell(&self) -> CellCoord {
        self.cell
    }

    /// Seconds added to the main clock when the orb is collected.
    #[must_use]
    pub const fn time_reward(&self) -> f32 {
        self.time_reward
    }

    /// Seconds removed from the main clock on a wrong answer.
    #[must_use]
    pub const fn time_penalty(&self) -> f32 {
        self.time_penalty
    }

    /// Whether the orb can still be interacted with.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.alive
    }

    /// Moves the orb to a fresh random open cell. The orb stays alive.
    ///
    /// On failure the orb keeps its current cell.
    pub fn respawn<R>(&mut self, grid: &MazeGrid, rng: &mut R) -> Result<CellCoord, MazeError>
    where
        R: Rng + ?Sized,
    {
        self.cell = positions::random_open_cell(grid, rng)?;
        Ok(self.cell)
    }

    /// Removes the orb from play.
    pub fn collect(&mut self) {
        self.alive = false;
    }
}

/// Every orb spawned in a session, indexed by identifier.
#[derive(Clone, Debug, Default)]
pub struct OrbRegistry {
    orbs: Vec<Orb>,
}

impl OrbRegistry {
    /// Places `count` orbs on independently drawn open cells.
    ///
    /// Several orbs may share a cell.
    pub fn spawn_all<R>(
        count: u32,
        grid: &MazeGrid,
        time_reward: f32,
        time_penalty: f32,
        rng: &mut R,
    ) -> Result<Self, MazeError>
    where
        R: Rng + ?Sized,
    {
        let orbs = (0..count)
            .map(|index| {
                positions::random_open_cell(grid, rng).map(|cell| Orb {
                    id: OrbId::new(index),
                    cell,
                    time_reward,
                    time_penalty,
                    alive: true,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { orbs })
    }

    /// Looks up an orb, dead or alive.
    #[must_use]
    pub fn get(&self, id: OrbId) -> Option<&Orb> {
        let index = usize::try_from(id.get()).ok()?;
        self.orbs.get(index)
    }

    /// Looks up a live orb for mutation.
    pub fn live_mut(&mut self, id: OrbId) -> Option<&mut Orb> {
        let index = usize::try_from(id.get()).ok()?;
        self.orbs.get_mut(index).filter(|orb| orb.alive)
    }

    /// Iterates over the orbs that are still in play.
    pub fn alive(&self) -> impl Iterator<Item = &Orb> {
        self.orbs.iter().filter(|orb| orb.alive)
    }

    /// Number of orbs still in play.
    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.alive().count()
    }

    /// Number of orbs ever spawned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.orbs.len()
    }

    /// Reports whether no orb was spawned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orbs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn maze() -> MazeGrid {
        MazeGrid::generate(11, 11, &mut ChaCha8Rng::seed_from_u64(17))
    }

    #[test]
    fn spawn_all_places_live_orbs_on_open_cells() {
        let grid = maze();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let registry = OrbRegistry::spawn_all(6, &grid, 5.0, 3.0, &mut rng).expect("spawned");

        assert_eq!(registry.len(), 6);
        assert_eq!(registry.alive_count(), 6);
        for (index, orb) in registry.alive().enumerate() {
            assert_eq!(orb.id(), OrbId::new(index as u32));
            assert!(grid.is_open(orb.cell()));
            assert!((orb.time_reward() - 5.0).abs() < f32::EPSILON);
            assert!((orb.time_penalty() - 3.0).abs() < f32::EPSILON);
        }
    }

    #[test]
    fn spawn_all_fails_without_open_cells() {
        let grid = MazeGrid::walled(8, 8);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let result = OrbRegistry::spawn_all(2, &grid, 1.0, 1.0, &mut rng);
        assert!(matches!(result, Err(MazeError::NoOpenCell { .. })));
    }

    #[test]
    fn respawn_keeps_orb_alive_on_open_cell() {
        let grid = maze();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut registry = OrbRegistry::spawn_all(1, &grid, 1.0, 1.0, &mut rng).expect("spawned");

        let orb = registry.live_mut(OrbId::new(0)).expect("live orb");
        let cell = orb.respawn(&grid, &mut rng).expect("respawned");

        assert_eq!(orb.cell(), cell);
        assert!(orb.is_alive());
        assert!(grid.is_open(cell));
    }

    #[test]
    fn collected_orb_is_no_longer_live() {
        let grid = maze();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut registry = OrbRegistry::spawn_all(2, &grid, 1.0, 1.0, &mut rng).expect("spawned");

        registry
            .live_mut(OrbId::new(1))
            .expect("live orb")
            .collect();

        assert!(registry.live_mut(OrbId::new(1)).is_none());
        assert_eq!(registry.alive_count(), 1);
        assert!(registry.get(OrbId::new(1)).is_some_and(|orb| !orb.is_alive()));
    }

    #[test]
    fn unknown_identifier_is_not_found() {
        let mut registry = OrbRegistry::default();
        assert!(registry.is_empty());
        assert!(registry.live_mut(OrbId::new(0)).is_none());
    }
}
