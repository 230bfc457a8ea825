use folio_core::starfield::Starfield;
use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::constants::STAR_COLOR;
use crate::dom::sync_canvas_backing_size;

/// Starfield drawn onto a fixed full-viewport 2D canvas.
pub struct StarCanvas {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    field: Starfield,
    css_size: Vec2,
}

impl StarCanvas {
    pub fn new(canvas: web::HtmlCanvasElement, seed: u64) -> anyhow::Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow::anyhow!("{:?}", e))?
            .ok_or_else(|| anyhow::anyhow!("no 2d context"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        let (w, h) = css_size(&canvas);
        sync_canvas_backing_size(&canvas);
        Ok(Self {
            field: Starfield::new(w, h, seed),
            css_size: Vec2::new(w, h),
            canvas,
            ctx,
        })
    }

    pub fn resize(&mut self) {
        let (w, h) = css_size(&self.canvas);
        sync_canvas_backing_size(&self.canvas);
        self.css_size = Vec2::new(w, h);
        self.field.resize(w, h);
    }

    pub fn pointer_moved(&mut self, p: Vec2) {
        self.field.pointer_moved(p.x, p.y);
    }

    pub fn frame(&mut self, scroll_y: f32) {
        self.field.step(scroll_y);
        let dpr = web::window().map_or(1.0, |w| w.device_pixel_ratio());
        let _ = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
        self.ctx.clear_rect(
            0.0,
            0.0,
            self.css_size.x as f64,
            self.css_size.y as f64,
        );
        self.ctx.set_fill_style_str(STAR_COLOR);
        for star in self.field.visible(self.css_size.y) {
            let p = star.position();
            self.ctx.set_global_alpha(star.opacity as f64);
            self.ctx.begin_path();
            let _ = self.ctx.arc(
                p.x as f64,
                p.y as f64,
                (star.size / 2.0) as f64,
                0.0,
                std::f64::consts::TAU,
            );
            self.ctx.fill();
        }
        self.ctx.set_global_alpha(1.0);
    }
}

fn css_size(canvas: &web::HtmlCanvasElement) -> (f32, f32) {
    let rect = canvas.get_bounding_client_rect();
    (rect.width() as f32, rect.height() as f32)
}
