use ast_core::spaceship::Spaceship;
use ast_core::Gamestate;
use ast_lib::CosmicEntity;
use macroquad::prelude::{
    clear_background, draw_circle, draw_circle_lines, draw_text, draw_triangle, Vec2, BLACK,
    GRAY, WHITE,
};

// Rotate a point based on the rotation
fn rotate_point(point: Vec2, rotation_angle: f32) -> Vec2 {
    let cos_angle = rotation_angle.cos();
    let sin_angle = rotation_angle.sin();

    Vec2::new(
        point.x * cos_angle - point.y * sin_angle,
        point.x * sin_angle + point.y * cos_angle,
    )
}

/// Filled triangle pointing along the heading
fn draw_spaceship(ship: &Spaceship) {
    let half_width = ship.get_width() / 2.0;
    let half_height = ship.get_height() / 2.0;
    let rotation = ship.get_heading().to_radians();
    let position = ship.get_position();

    let front = rotate_point(Vec2::new(half_width, 0.0), rotation);
    let left = rotate_point(Vec2::new(-half_width, half_height), rotation);
    let right = rotate_point(Vec2::new(-half_width, -half_height), rotation);

    draw_triangle(position + front, position + left, position + right, WHITE);
}

/// Draw a whole frame of the game
pub fn draw_all(gamestate: &Gamestate) {
    clear_background(BLACK);

    for asteroid in gamestate.asteroids.values() {
        let pos = asteroid.get_position();
        draw_circle_lines(pos.x, pos.y, asteroid.get_radius(), 1.5, WHITE);
    }

    for bullet in gamestate.bullets.values() {
        let pos = bullet.get_position();
        draw_circle(pos.x, pos.y, bullet.get_radius(), WHITE);
    }

    draw_spaceship(&gamestate.spaceship);

    draw_text(&format!("Score: {}", gamestate.score), 20.0, 40.0, 32.0, WHITE);
    draw_text(&format!("Wave: {}", gamestate.waves), 20.0, 70.0, 24.0, GRAY);
    draw_text(
        &format!("Speed: {:.1}", gamestate.spaceship.get_thrust().length()),
        20.0,
        95.0,
        24.0,
        GRAY,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quarter_turn_maps_x_onto_y() {
        let rotated = rotate_point(Vec2::new(1.0, 0.0), std::f32::consts::FRAC_PI_2);
        assert!(rotated.x.abs() < 1e-6);
        assert!((rotated.y - 1.0).abs() < 1e-6);
    }
}
