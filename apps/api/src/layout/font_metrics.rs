//! Glyph-width tables for the PDF base-14 fonts the exporter uses.
//!
//! Widths are the AFM advance widths in thousandths of an em, so a string's
//! width at `size_pt` is `sum / 1000 * size_pt` points. Tables cover ASCII
//! 0x20..=0x7E; index = (char as usize) - 32.

use serde::{Deserialize, Serialize};

/// Millimetres per PostScript point.
pub const MM_PER_PT: f32 = 25.4 / 72.0;

// ────────────────────────────────────────────────────────────────────────────
// Font family / face
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    Helvetica,
    Times,
}

/// A family plus weight. Maps one-to-one onto a built-in PDF font.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontFace {
    pub family: FontFamily,
    pub bold: bool,
}

impl FontFace {
    pub const fn new(family: FontFamily, bold: bool) -> Self {
        Self { family, bold }
    }

    pub fn metrics(self) -> &'static FontMetricTable {
        match (self.family, self.bold) {
            (FontFamily::Helvetica, false) => &HELVETICA,
            (FontFamily::Helvetica, true) => &HELVETICA_BOLD,
            (FontFamily::Times, false) => &TIMES_ROMAN,
            (FontFamily::Times, true) => &TIMES_BOLD,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Width array slot layout:
/// ```text
/// [0]=sp  [1]=!   [2]="   [3]=#   [4]=$   [5]=%   [6]=&   [7]='
/// [8]=(   [9]=)   [10]=*  [11]=+  [12]=,  [13]=-  [14]=.  [15]=/
/// [16..25]=0-9
/// [26]=:  [27]=;  [28]=<  [29]==  [30]=>  [31]=?  [32]=@
/// [33..58]=A-Z
/// [59]=[  [60]=\  [61]=]  [62]=^  [63]=_  [64]=`
/// [65..90]=a-z
/// [91]={  [92]=|  [93]=}  [94]=~
/// ```
pub struct FontMetricTable {
    pub name: &'static str,
    widths: [u16; 95],
    /// Used for anything outside printable ASCII.
    fallback_width: u16,
}

impl FontMetricTable {
    fn glyph_width(&self, c: char) -> u16 {
        let code = c as usize;
        if (32..=126).contains(&code) {
            self.widths[code - 32]
        } else {
            self.fallback_width
        }
    }

    /// Width of `s` in em units.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars().map(|c| f32::from(self.glyph_width(c))).sum::<f32>() / 1000.0
    }

    /// Width of `s` in millimetres when set at `size_pt`.
    pub fn width_mm(&self, s: &str, size_pt: f32) -> f32 {
        self.measure_str(s) * size_pt * MM_PER_PT
    }

    pub fn space_width_mm(&self, size_pt: f32) -> f32 {
        self.width_mm(" ", size_pt)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables  (95 ASCII printable characters each)
// ────────────────────────────────────────────────────────────────────────────

static HELVETICA: FontMetricTable = FontMetricTable {
    name: "Helvetica",
    #[rustfmt::skip]
    widths: [
        // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
        // 0    1    2    3    4    5    6    7    8    9
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        // :    ;    <    =    >    ?    @
        278, 278, 584, 584, 584, 556, 1015,
        // A    B    C    D    E    F    G    H    I    J    K    L    M
        667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
        // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        // [    \    ]    ^    _    `
        278, 278, 278, 469, 556, 333,
        // a    b    c    d    e    f    g    h    i    j    k    l    m
        556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
        // n    o    p    q    r    s    t    u    v    w    x    y    z
        556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
        // {    |    }    ~
        334, 260, 334, 584,
    ],
    fallback_width: 556,
};

static HELVETICA_BOLD: FontMetricTable = FontMetricTable {
    name: "Helvetica-Bold",
    #[rustfmt::skip]
    widths: [
        // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
        // 0    1    2    3    4    5    6    7    8    9
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        // :    ;    <    =    >    ?    @
        333, 333, 584, 584, 584, 611, 975,
        // A    B    C    D    E    F    G    H    I    J    K    L    M
        722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
        // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        // [    \    ]    ^    _    `
        333, 278, 333, 584, 556, 333,
        // a    b    c    d    e    f    g    h    i    j    k    l    m
        556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
        // n    o    p    q    r    s    t    u    v    w    x    y    z
        611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
        // {    |    }    ~
        389, 280, 389, 584,
    ],
    fallback_width: 611,
};

static TIMES_ROMAN: FontMetricTable = FontMetricTable {
    name: "Times-Roman",
    #[rustfmt::skip]
    widths: [
        // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
        // 0    1    2    3    4    5    6    7    8    9
        500, 500, 500, 500, 500, 500, 500, 500, 500, 500,
        // :    ;    <    =    >    ?    @
        278, 278, 564, 564, 564, 444, 921,
        // A    B    C    D    E    F    G    H    I    J    K    L    M
        722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889,
        // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
        722, 722, 556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611,
        // [    \    ]    ^    _    `
        333, 278, 333, 469, 500, 333,
        // a    b    c    d    e    f    g    h    i    j    k    l    m
        444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778,
        // n    o    p    q    r    s    t    u    v    w    x    y    z
        500, 500, 500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444,
        // {    |    }    ~
        480, 200, 480, 541,
    ],
    fallback_width: 500,
};

static TIMES_BOLD: FontMetricTable = FontMetricTable {
    name: "Times-Bold",
    #[rustfmt::skip]
    widths: [
        // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        250, 333, 555, 500, 500, 1000, 833, 278, 333, 333, 500, 570, 250, 333, 250, 278,
        // 0    1    2    3    4    5    6    7    8    9
        500, 500, 500, 500, 500, 500, 500, 500, 500, 500,
        // :    ;    <    =    >    ?    @
        333, 333, 570, 570, 570, 500, 930,
        // A    B    C    D    E    F    G    H    I    J    K    L    M
        722, 667, 722, 722, 667, 611, 778, 778, 389, 500, 778, 667, 944,
        // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
        722, 778, 611, 778, 722, 556, 667, 722, 722, 1000, 722, 722, 667,
        // [    \    ]    ^    _    `
        333, 278, 333, 581, 500, 333,
        // a    b    c    d    e    f    g    h    i    j    k    l    m
        500, 556, 444, 556, 444, 333, 500, 556, 278, 333, 556, 278, 833,
        // n    o    p    q    r    s    t    u    v    w    x    y    z
        556, 500, 556, 556, 444, 389, 333, 556, 500, 722, 500, 500, 444,
        // {    |    }    ~
        394, 220, 394, 520,
    ],
    fallback_width: 556,
};
