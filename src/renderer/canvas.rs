//! Canvas 2D backend
//!
//! Sprites load asynchronously; until an image has decoded its draw falls
//! back to a flat rectangle (or is skipped if it has no fallback colour).

use std::collections::HashMap;

use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use super::scene::{DrawCommand, SpriteId};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    images: HashMap<SpriteId, HtmlImageElement>,
}

impl CanvasRenderer {
    /// Start loading every sprite
    pub fn new(ctx: CanvasRenderingContext2d) -> Result<Self, JsValue> {
        let mut images = HashMap::new();
        for sprite in SpriteId::all() {
            let img = HtmlImageElement::new()?;
            img.set_src(&sprite.asset_path());
            images.insert(sprite, img);
        }
        log::info!("Loading {} sprites", images.len());
        Ok(Self { ctx, images })
    }

    /// Draw one frame
    pub fn render(&self, cmds: &[DrawCommand]) {
        self.ctx
            .clear_rect(0.0, 0.0, SCREEN_WIDTH as f64, SCREEN_HEIGHT as f64);
        for cmd in cmds {
            if let Err(e) = self.draw(cmd) {
                log::warn!("Draw of {:?} failed: {:?}", cmd.sprite, e);
            }
        }
    }

    fn draw(&self, cmd: &DrawCommand) -> Result<(), JsValue> {
        let (x, y) = (cmd.pos.x as f64, cmd.pos.y as f64);
        let (w, h) = (cmd.size.x as f64, cmd.size.y as f64);

        let Some(img) = self.images.get(&cmd.sprite).filter(|img| is_loaded(img)) else {
            if let Some(color) = cmd.fallback {
                self.ctx.set_fill_style_str(color);
                self.ctx.fill_rect(x, y, w, h);
            }
            return Ok(());
        };

        if cmd.rotation == 0.0 {
            return self
                .ctx
                .draw_image_with_html_image_element_and_dw_and_dh(img, x, y, w, h);
        }

        self.ctx.save();
        let result = self
            .ctx
            .translate(x + w / 2.0, y + h / 2.0)
            .and_then(|_| self.ctx.rotate(cmd.rotation as f64))
            .and_then(|_| {
                self.ctx
                    .draw_image_with_html_image_element_and_dw_and_dh(img, -w / 2.0, -h / 2.0, w, h)
            });
        self.ctx.restore();
        result
    }
}

/// `complete` is also true for broken images, so check the decoded size too
fn is_loaded(img: &HtmlImageElement) -> bool {
    img.complete() && img.natural_width() > 0
}
