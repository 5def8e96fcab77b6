//! Player vs spider contact classification
//!
//! A stomp needs the player's feet above the spider's middle while falling.
//! Any other touch is damage, and damage wins over stomps in the same tick.

use super::player::Player;
use super::spider::Spider;

/// Outcome of checking the player against every spider
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Contact {
    None,
    /// At least one spider touched the player from the side or below
    Damage,
    /// Ids of every spider stomped this tick
    Stomp(Vec<u32>),
}

/// Whether the player lands on top of this spider
pub fn is_stomp(player: &Player, spider: &Spider, tolerance: f32) -> bool {
    player.body.bottom() < spider.body.center().y + tolerance && player.is_falling()
}

/// Classify every spider overlapping the player
pub fn classify_contacts(player: &Player, spiders: &[Spider], tolerance: f32) -> Contact {
    let mut stomped = Vec::new();

    for spider in spiders.iter().filter(|s| s.body.overlaps(&player.body)) {
        if !is_stomp(player, spider, tolerance) {
            return Contact::Damage;
        }
        stomped.push(spider.id);
    }

    if stomped.is_empty() {
        Contact::None
    } else {
        Contact::Stomp(stomped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::spider::Direction;
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn spider_at(id: u32, x: f32, tuning: &Tuning) -> Spider {
        Spider::new(id, x, 1.0, Direction::Left, tuning)
    }

    /// Player whose feet are at `bottom`, moving with `vy`
    fn player_at(x: f32, bottom: f32, vy: f32, tuning: &Tuning) -> Player {
        let mut player = Player::new(tuning, 2);
        player.body.pos.x = x;
        player.body.set_bottom(bottom);
        player.body.vel = Vec2::new(0.0, vy);
        player.on_ground = false;
        player
    }

    #[test]
    fn test_no_overlap() {
        let tuning = Tuning::default();
        let player = player_at(100.0, 540.0, 0.0, &tuning);
        let spiders = vec![spider_at(1, 400.0, &tuning)];
        assert_eq!(classify_contacts(&player, &spiders, 10.0), Contact::None);
    }

    #[test]
    fn test_falling_onto_spider_is_stomp() {
        let tuning = Tuning::default();
        // Spider top is 520, centre 530; feet at 525 while falling
        let player = player_at(300.0, 525.0, 4.0, &tuning);
        let spiders = vec![spider_at(1, 305.0, &tuning)];
        assert_eq!(
            classify_contacts(&player, &spiders, 10.0),
            Contact::Stomp(vec![1])
        );
    }

    #[test]
    fn test_rising_into_spider_is_damage() {
        let tuning = Tuning::default();
        let player = player_at(300.0, 525.0, -4.0, &tuning);
        let spiders = vec![spider_at(1, 305.0, &tuning)];
        assert_eq!(classify_contacts(&player, &spiders, 10.0), Contact::Damage);
    }

    #[test]
    fn test_side_contact_on_ground_is_damage() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning, 2);
        player.body.pos.x = 300.0;
        let spiders = vec![spider_at(1, 320.0, &tuning)];
        assert_eq!(classify_contacts(&player, &spiders, 10.0), Contact::Damage);
    }

    #[test]
    fn test_damage_overrides_stomps() {
        let tuning = Tuning::default();
        // One spider is stomped cleanly, a raised one hits the player's side
        let player = player_at(300.0, 525.0, 4.0, &tuning);
        let mut tall = spider_at(2, 320.0, &tuning);
        tall.body.pos.y = 480.0;
        let spiders = vec![spider_at(1, 290.0, &tuning), tall];
        assert_eq!(classify_contacts(&player, &spiders, 10.0), Contact::Damage);
    }

    #[test]
    fn test_multikill_collects_all() {
        let tuning = Tuning::default();
        let player = player_at(300.0, 522.0, 6.0, &tuning);
        let spiders = vec![
            spider_at(1, 280.0, &tuning),
            spider_at(2, 310.0, &tuning),
            spider_at(3, 600.0, &tuning),
        ];
        assert_eq!(
            classify_contacts(&player, &spiders, 10.0),
            Contact::Stomp(vec![1, 2])
        );
    }
}
