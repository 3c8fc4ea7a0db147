use super::*;

impl Game {
    /// Every enemy on the player's cell is found first, then each contact is
    /// resolved on its own in entity order. A frightened enemy is eaten and
    /// respawned; a normal one costs a life.
    pub(super) fn resolve_collisions(&mut self, events: &mut Vec<GameEvent>) {
        let player_id = self.state.player_id();
        let player_pos = self.state.player().pos;
        let touching: Vec<EntityId> = self
            .state
            .entities
            .iter()
            .filter(|&(id, entity)| id != player_id && entity.pos() == player_pos)
            .map(|(id, _)| id)
            .collect();

        for enemy in touching {
            match self.modes.resolve_contact(enemy) {
                Mode::Frightened => {
                    self.state.entities[enemy].respawn();
                    events.push(GameEvent::EnemyEaten { enemy });
                    tracing::info!(tick = self.tick, ?enemy, "frightened enemy eaten");
                }
                Mode::Normal => {
                    let lives_left = self.state.player_mut().lose_life();
                    if let Entity::Chaser(chaser) = &mut self.state.entities[enemy] {
                        chaser.clear_plan();
                    }
                    events.push(GameEvent::PlayerCaught { enemy, lives_left });
                    tracing::info!(tick = self.tick, ?enemy, lives_left, "player caught");
                }
            }
        }
    }
}
