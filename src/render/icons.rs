//! Language tiles rasterised with a 2D canvas and copied into a texture
//! array, one layer per tile.

use super::helpers;
use backdrop_core::icons::{self, IconStyle, ICONS, ICON_LAYER_COUNT, ICON_TEXTURE_SIZE};
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

type Ctx2d = web::CanvasRenderingContext2d;

fn js_err(e: JsValue) -> anyhow::Error {
    anyhow::anyhow!("canvas 2d: {:?}", e)
}

pub(crate) struct IconAtlas {
    // Owned here so the layers outlive every bind group using the view
    _texture: wgpu::Texture,
    pub(crate) view: wgpu::TextureView,
    pub(crate) sampler: wgpu::Sampler,
}

impl IconAtlas {
    /// Paint every face and side tile on one scratch canvas. Each copy
    /// snapshots the canvas, so it is reused for all layers.
    pub(crate) fn paint(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        document: &web::Document,
    ) -> anyhow::Result<Self> {
        let canvas = document
            .create_element("canvas")
            .map_err(js_err)?
            .dyn_into::<web::HtmlCanvasElement>()
            .map_err(|_| anyhow::anyhow!("created element is not a canvas"))?;
        canvas.set_width(ICON_TEXTURE_SIZE);
        canvas.set_height(ICON_TEXTURE_SIZE);
        let ctx = canvas
            .get_context("2d")
            .map_err(js_err)?
            .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
            .dyn_into::<Ctx2d>()
            .map_err(|_| anyhow::anyhow!("unexpected 2d context type"))?;

        let (texture, view) = helpers::create_layered_texture(
            device,
            "icon_tiles",
            ICON_TEXTURE_SIZE,
            ICON_LAYER_COUNT,
            wgpu::TextureFormat::Rgba8Unorm,
            wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_DST
                | wgpu::TextureUsages::RENDER_ATTACHMENT,
        );
        for (i, style) in ICONS.iter().enumerate() {
            paint_face(&ctx, style)?;
            copy_layer(queue, &canvas, &texture, icons::face_layer(i));
            paint_side(&ctx, style);
            copy_layer(queue, &canvas, &texture, icons::side_layer(i));
        }

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("icon_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        log::info!("[icons] painted {} tiles", ICON_LAYER_COUNT);
        Ok(Self {
            _texture: texture,
            view,
            sampler,
        })
    }
}

fn copy_layer(
    queue: &wgpu::Queue,
    canvas: &web::HtmlCanvasElement,
    texture: &wgpu::Texture,
    layer: u32,
) {
    queue.copy_external_image_to_texture(
        &wgpu::CopyExternalImageSourceInfo {
            source: wgpu::ExternalImageSource::HTMLCanvasElement(canvas.clone()),
            origin: wgpu::Origin2d::ZERO,
            flip_y: false,
        },
        wgpu::CopyExternalImageDestInfo {
            texture,
            mip_level: 0,
            origin: wgpu::Origin3d {
                x: 0,
                y: 0,
                z: layer,
            },
            aspect: wgpu::TextureAspect::All,
            color_space: wgpu::PredefinedColorSpace::Srgb,
            premultiplied_alpha: false,
        },
        wgpu::Extent3d {
            width: ICON_TEXTURE_SIZE,
            height: ICON_TEXTURE_SIZE,
            depth_or_array_layers: 1,
        },
    );
}

fn rounded_rect(ctx: &Ctx2d, size: f64, r: f64) {
    ctx.begin_path();
    ctx.move_to(r, 0.0);
    ctx.line_to(size - r, 0.0);
    ctx.quadratic_curve_to(size, 0.0, size, r);
    ctx.line_to(size, size - r);
    ctx.quadratic_curve_to(size, size, size - r, size);
    ctx.line_to(r, size);
    ctx.quadratic_curve_to(0.0, size, 0.0, size - r);
    ctx.line_to(0.0, r);
    ctx.quadratic_curve_to(0.0, 0.0, r, 0.0);
    ctx.close_path();
}

/// Rounded tile with an inner glow, a light border, the symbol and the
/// language name underneath.
fn paint_face(ctx: &Ctx2d, style: &IconStyle) -> anyhow::Result<()> {
    let size = ICON_TEXTURE_SIZE as f64;
    let c = size / 2.0;
    ctx.set_shadow_blur(0.0);
    ctx.clear_rect(0.0, 0.0, size, size);

    rounded_rect(ctx, size, icons::FACE_CORNER_RADIUS);
    ctx.set_fill_style_str(&icons::css_hex(style.background));
    ctx.fill();

    let (inner, inner_color) = icons::FACE_GLOW_INNER;
    let glow = ctx
        .create_radial_gradient(c, c, inner, c, c, c)
        .map_err(js_err)?;
    glow.add_color_stop(0.0, inner_color).map_err(js_err)?;
    glow.add_color_stop(1.0, icons::FACE_GLOW_OUTER).map_err(js_err)?;
    ctx.set_fill_style_canvas_gradient(&glow);
    ctx.fill();

    ctx.set_stroke_style_str(icons::FACE_BORDER_COLOR);
    ctx.set_line_width(icons::FACE_BORDER_WIDTH);
    ctx.stroke();

    let (blur, shadow) = icons::SYMBOL_SHADOW;
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    ctx.set_shadow_color(shadow);
    ctx.set_shadow_blur(blur);
    ctx.set_fill_style_str(&icons::css_hex(style.foreground));
    ctx.set_font(&icons::symbol_font(style.symbol));
    ctx.fill_text(style.symbol, c, c + icons::SYMBOL_OFFSET_Y).map_err(js_err)?;

    ctx.set_shadow_blur(icons::LABEL_SHADOW_BLUR);
    ctx.set_fill_style_str(icons::LABEL_COLOR);
    ctx.set_font(&icons::label_font());
    ctx.fill_text(style.name, c, c + icons::LABEL_OFFSET_Y).map_err(js_err)?;
    Ok(())
}

/// Solid accent with a faint grid.
fn paint_side(ctx: &Ctx2d, style: &IconStyle) {
    let size = ICON_TEXTURE_SIZE as f64;
    ctx.set_shadow_blur(0.0);
    ctx.set_fill_style_str(&icons::css_hex(style.accent));
    ctx.fill_rect(0.0, 0.0, size, size);

    ctx.set_stroke_style_str(icons::SIDE_GRID_COLOR);
    ctx.set_line_width(icons::SIDE_GRID_WIDTH);
    for at in icons::side_grid_offsets(size) {
        ctx.begin_path();
        ctx.move_to(at, 0.0);
        ctx.line_to(at, size);
        ctx.stroke();
        ctx.begin_path();
        ctx.move_to(0.0, at);
        ctx.line_to(size, at);
        ctx.stroke();
    }
}
