use rand::seq::SliceRandom;
use rand::Rng;

use super::{GameError, Role, MIN_PLAYERS};

/// Check a role split before anything is dealt
///
/// # Errors
///
/// Returns an error if fewer than [`MIN_PLAYERS`] are seated, or if the
/// impostor count is not in `1..player_count` (at least one civilian must
/// remain to share the word).
pub fn validate_distribution(player_count: usize, impostor_count: usize) -> Result<(), GameError> {
    if player_count < MIN_PLAYERS {
        return Err(GameError::NotEnoughPlayers(player_count));
    }

    if impostor_count == 0 || impostor_count >= player_count {
        return Err(GameError::InvalidImpostorCount {
            requested: impostor_count,
            max: player_count - 1,
        });
    }

    Ok(())
}

/// Pick which seats are impostors
///
/// Partially shuffles the seat indices so only the first `impostor_count`
/// positions are drawn; every subset of that size is equally likely.
///
/// # Returns
///
/// The impostor seat indices, in draw order
pub fn pick_impostor_seats<R: Rng + ?Sized>(
    player_count: usize,
    impostor_count: usize,
    rng: &mut R,
) -> Result<Vec<usize>, GameError> {
    validate_distribution(player_count, impostor_count)?;

    let mut seats: Vec<usize> = (0..player_count).collect();
    let (drawn, _) = seats.partial_shuffle(rng, impostor_count);

    Ok(drawn.to_vec())
}

/// Deal a role to every seat
///
/// # Arguments
///
/// * `player_count` - Number of seated players
/// * `impostor_count` - How many of them are impostors
/// * `rng` - Source of randomness
///
/// # Returns
///
/// One role per seat, in seat order
pub fn assign_roles<R: Rng + ?Sized>(
    player_count: usize,
    impostor_count: usize,
    rng: &mut R,
) -> Result<Vec<Role>, GameError> {
    let mut roles = vec![Role::Civilian; player_count];

    for seat in pick_impostor_seats(player_count, impostor_count, rng)? {
        roles[seat] = Role::Impostor;
    }

    tracing::debug!(
        "Dealt roles for {} players: {} impostors, {} civilians",
        player_count,
        impostor_count,
        player_count - impostor_count
    );

    Ok(roles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn count(roles: &[Role], role: Role) -> usize {
        roles.iter().filter(|r| **r == role).count()
    }

    #[test]
    fn test_assign_roles_counts() {
        let mut rng = StdRng::seed_from_u64(7);

        for player_count in 3..=12 {
            for impostor_count in 1..player_count {
                let roles = assign_roles(player_count, impostor_count, &mut rng).unwrap();
                assert_eq!(roles.len(), player_count);
                assert_eq!(count(&roles, Role::Impostor), impostor_count);
                assert_eq!(count(&roles, Role::Civilian), player_count - impostor_count);
            }
        }
    }

    #[test]
    fn test_all_but_one_impostor_terminates() {
        let mut rng = StdRng::seed_from_u64(1);

        let roles = assign_roles(3, 2, &mut rng).unwrap();
        assert_eq!(count(&roles, Role::Civilian), 1);
        assert_eq!(count(&roles, Role::Impostor), 2);
    }

    #[test]
    fn test_everyone_impostor_rejected() {
        let mut rng = StdRng::seed_from_u64(1);

        let result = assign_roles(3, 3, &mut rng);
        assert_eq!(
            result,
            Err(GameError::InvalidImpostorCount {
                requested: 3,
                max: 2
            })
        );
    }

    #[test]
    fn test_zero_impostors_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(assign_roles(4, 0, &mut rng).is_err());
    }

    #[test]
    fn test_too_few_players_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            assign_roles(2, 1, &mut rng),
            Err(GameError::NotEnoughPlayers(2))
        );
    }

    #[test]
    fn test_picked_seats_are_distinct_and_in_range() {
        let mut rng = StdRng::seed_from_u64(99);

        let mut seats = pick_impostor_seats(10, 4, &mut rng).unwrap();
        seats.sort_unstable();
        seats.dedup();

        assert_eq!(seats.len(), 4);
        assert!(seats.iter().all(|&s| s < 10));
    }

    #[test]
    fn test_single_impostor_uniform_over_seats() {
        const SEATS: usize = 5;
        const TRIALS: usize = 10_000;
        // Chi-square critical value, 4 degrees of freedom, p = 0.001
        const CRITICAL: f64 = 18.467;

        let mut rng = StdRng::seed_from_u64(2024);
        let mut hits = [0usize; SEATS];

        for _ in 0..TRIALS {
            let seats = pick_impostor_seats(SEATS, 1, &mut rng).unwrap();
            hits[seats[0]] += 1;
        }

        let expected = TRIALS as f64 / SEATS as f64;
        let chi_square: f64 = hits
            .iter()
            .map(|&observed| {
                let diff = observed as f64 - expected;
                diff * diff / expected
            })
            .sum();

        assert!(
            chi_square < CRITICAL,
            "seat frequencies {:?} not uniform (chi^2 = {:.2})",
            hits,
            chi_square
        );
    }
}
