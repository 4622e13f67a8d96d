use palette::Srgb;

// ---------------------------------------------------------------------------
// Fixed palettes
// ---------------------------------------------------------------------------

/// Plotly's default qualitative sequence, used for per-category traces.
const QUALITATIVE: [(u8, u8, u8); 10] = [
    (0x63, 0x6e, 0xfa),
    (0xef, 0x55, 0x3b),
    (0x00, 0xcc, 0x96),
    (0xab, 0x63, 0xfa),
    (0xff, 0xa1, 0x5a),
    (0x19, 0xd3, 0xf3),
    (0xff, 0x66, 0x92),
    (0xb6, 0xe8, 0x80),
    (0xff, 0x97, 0xff),
    (0xfe, 0xcb, 0x52),
];

/// ColorBrewer RdBu, red → blue.
const RDBU: [(u8, u8, u8); 11] = [
    (103, 0, 31),
    (178, 24, 43),
    (214, 96, 77),
    (244, 165, 130),
    (253, 219, 199),
    (247, 247, 247),
    (209, 229, 240),
    (146, 197, 222),
    (67, 147, 195),
    (33, 102, 172),
    (5, 48, 97),
];

fn srgb((r, g, b): (u8, u8, u8)) -> Srgb<u8> {
    Srgb::new(r, g, b)
}

/// `#rrggbb` notation.
pub fn to_hex(color: Srgb<u8>) -> String {
    format!("#{:02x}{:02x}{:02x}", color.red, color.green, color.blue)
}

/// `rgb(r,g,b)` notation.
pub fn to_css_rgb(color: Srgb<u8>) -> String {
    format!("rgb({},{},{})", color.red, color.green, color.blue)
}

/// Diverging blue → red scale (RdBu reversed) as evenly spaced stops.
pub fn diverging_scale() -> Vec<(f64, String)> {
    let last = (RDBU.len() - 1) as f64;
    RDBU.iter()
        .rev()
        .enumerate()
        .map(|(i, &rgb)| (i as f64 / last, to_css_rgb(srgb(rgb))))
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: category → Srgb
// ---------------------------------------------------------------------------

/// Assigns the qualitative sequence to categories in order of first
/// appearance, cycling when there are more categories than colours.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: Vec<(String, Srgb<u8>)>,
}

impl ColorMap {
    pub fn new<'a, I>(categories: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut mapping: Vec<(String, Srgb<u8>)> = Vec::new();
        for category in categories {
            if mapping.iter().all(|(seen, _)| seen != category) {
                let color = srgb(QUALITATIVE[mapping.len() % QUALITATIVE.len()]);
                mapping.push((category.to_string(), color));
            }
        }
        ColorMap { mapping }
    }

    /// Categories in first-appearance order with their colours.
    pub fn legend_entries(&self) -> &[(String, Srgb<u8>)] {
        &self.mapping
    }
}
