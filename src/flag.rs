pub struct Flag;
#[allow(dead_code)]
impl Flag {
    pub const MADCTL_MY: u8 = 0x80;
    pub const MADCTL_MX: u8 = 0x40;
    pub const MADCTL_MV: u8 = 0x20;
    pub const MADCTL_RGB: u8 = 0x00;
    pub const COLMOD_12BIT: u8 = 0x03;
    pub const FRAME_RATE_NORMAL: [u8; 3] = [0x01, 0x2C, 0x2D];
}

#[rustfmt::skip]
/// Gamma adjustments, positive polarity
pub const GAMMA_POSITIVE: [u8; 16] = [
    0x02, 0x1c, 0x07, 0x12, 0x37, 0x32, 0x29, 0x2D,
    0x29, 0x25, 0x2B, 0x39, 0x00, 0x01, 0x03, 0x10,
];

#[rustfmt::skip]
/// Gamma adjustments, negative polarity
pub const GAMMA_NEGATIVE: [u8; 16] = [
    0x03, 0x1D, 0x07, 0x06, 0x2E, 0x2C, 0x29, 0x2D,
    0x2E, 0x2E, 0x37, 0x3F, 0x00, 0x00, 0x02, 0x10,
];
