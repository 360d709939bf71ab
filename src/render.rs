//! Canvas-2D draw step
//!
//! A read-only pass over the world: night-sky gradient, stars, clouds, the
//! entity layer and the player ball, redrawn in full every frame. Wobble
//! offsets are applied here and at collision time only, never written back
//! into stored positions.

use std::f64::consts::TAU;

use web_sys::CanvasRenderingContext2d;

use crate::sim::World;

/// Draw one frame of the current world.
pub fn draw_frame(ctx: &CanvasRenderingContext2d, world: &World) {
    let width = world.width as f64;
    let height = world.height as f64;

    ctx.clear_rect(0.0, 0.0, width, height);
    draw_backdrop(ctx, world, width, height);
    draw_coins(ctx, world);
    draw_enemies(ctx, world);
    draw_ball(ctx, world);
}

fn fill_circle(ctx: &CanvasRenderingContext2d, x: f64, y: f64, radius: f64) {
    ctx.begin_path();
    let _ = ctx.arc(x, y, radius, 0.0, TAU);
    ctx.fill();
}

fn draw_backdrop(ctx: &CanvasRenderingContext2d, world: &World, width: f64, height: f64) {
    let gradient = ctx.create_linear_gradient(0.0, 0.0, 0.0, height);
    let _ = gradient.add_color_stop(0.0, "#1e2a78");
    let _ = gradient.add_color_stop(1.0, "#0b1020");
    ctx.set_fill_style_canvas_gradient(&gradient);
    ctx.fill_rect(0.0, 0.0, width, height);

    for star in &world.backdrop.stars {
        ctx.set_fill_style_str(&format!("rgba(255,255,255,{})", star.alpha));
        fill_circle(ctx, star.pos.x as f64, star.pos.y as f64, star.size as f64);
    }

    // Each cloud is three overlapping puffs filled as one path
    ctx.set_fill_style_str("rgba(255,255,255,0.07)");
    for cloud in &world.backdrop.clouds {
        let (x, y) = (cloud.pos.x as f64, cloud.pos.y as f64);
        let size = cloud.size as f64;
        ctx.begin_path();
        let _ = ctx.arc(x, y, size, 0.0, TAU);
        let _ = ctx.arc(x + size * 0.85, y + 10.0, size * 0.75, 0.0, TAU);
        let _ = ctx.arc(x - size * 0.85, y + 10.0, size * 0.75, 0.0, TAU);
        ctx.fill();
    }

    // Ground strip
    ctx.set_fill_style_str("rgba(255,255,255,0.05)");
    ctx.fill_rect(0.0, height - 36.0, width, 36.0);
}

fn draw_coins(ctx: &CanvasRenderingContext2d, world: &World) {
    for coin in &world.coins {
        if coin.collected {
            continue;
        }
        let center = coin.hit_center();
        let (x, y) = (center.x as f64, center.y as f64);
        let radius = coin.radius as f64;

        ctx.set_fill_style_str("rgba(255, 208, 64, 0.95)");
        fill_circle(ctx, x, y, radius);

        // Specular glint, offset up-left
        ctx.set_fill_style_str("rgba(255,255,255,0.35)");
        fill_circle(ctx, x - 3.0, y - 3.0, radius * 0.45);
    }
}

fn draw_enemies(ctx: &CanvasRenderingContext2d, world: &World) {
    for enemy in &world.enemies {
        let center = enemy.hit_center();
        let (x, y) = (center.x as f64, center.y as f64);
        let radius = enemy.radius as f64;

        ctx.set_fill_style_str("rgba(255,80,120,0.95)");
        fill_circle(ctx, x, y, radius);

        ctx.set_stroke_style_str("rgba(255,255,255,0.18)");
        ctx.set_line_width(2.0);
        ctx.begin_path();
        let _ = ctx.arc(x, y, radius + 4.0, 0.0, TAU);
        ctx.stroke();
    }
}

fn draw_ball(ctx: &CanvasRenderingContext2d, world: &World) {
    let (x, y) = (world.ball.pos.x as f64, world.ball.pos.y as f64);

    ctx.set_fill_style_str("#f2f2f2");
    fill_circle(ctx, x, y, world.ball.radius as f64);

    ctx.set_fill_style_str("rgba(0,0,0,0.55)");
    fill_circle(ctx, x + 5.0, y - 3.0, 2.5);
}
