//! Radio payloads exchanged with the vehicle.
//!
//! Every frame carries a [`ControlPacket`]; the receiver may piggyback an
//! [`AckPacket`] with its sensor readings on the acknowledgement.

use crate::analog::OutputRange;

pub trait Transport {
    type Error: core::fmt::Debug;

    fn send(&mut self, packet: &ControlPacket) -> Result<(), Self::Error>;

    /// Ack payload that arrived with the last send, if any.
    fn try_receive_ack(&mut self) -> Option<AckPacket>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    type Error = T::Error;

    fn send(&mut self, packet: &ControlPacket) -> Result<(), Self::Error> {
        (**self).send(packet)
    }

    fn try_receive_ack(&mut self) -> Option<AckPacket> {
        (**self).try_receive_ack()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ControlPacket {
    pub throttle: u8,
    pub steering: u8,
}

impl Default for ControlPacket {
    fn default() -> Self {
        let neutral = OutputRange::BYTE.neutral as u8;
        Self {
            throttle: neutral,
            steering: neutral,
        }
    }
}

impl ControlPacket {
    pub const LEN: usize = 2;

    pub fn from_values(throttle: i16, steering: i16) -> Self {
        Self {
            throttle: to_byte(throttle),
            steering: to_byte(steering),
        }
    }

    /// Same packet with the throttle held at rest.
    pub fn stopped(self) -> Self {
        Self {
            throttle: OutputRange::BYTE.neutral as u8,
            ..self
        }
    }

    pub fn to_bytes(&self) -> [u8; Self::LEN] {
        [self.throttle, self.steering]
    }
}

fn to_byte(value: i16) -> u8 {
    let range = OutputRange::BYTE;
    value.clamp(range.min, range.max) as u8
}

/// Acknowledgement payload: five big-endian words.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AckPacket {
    pub bytes: [u8; AckPacket::LEN],
}

impl AckPacket {
    pub const LEN: usize = 10;

    /// `None` unless `bytes` is exactly one payload long.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        let bytes: [u8; Self::LEN] = bytes.try_into().ok()?;
        Some(Self { bytes })
    }

    pub fn decode(&self) -> Telemetry {
        let word = |i: usize| [self.bytes[i * 2], self.bytes[i * 2 + 1]];
        Telemetry {
            battery_dv: u16::from_be_bytes(word(0)),
            temp1_dc: u16::from_be_bytes(word(1)),
            temp2_dc: u16::from_be_bytes(word(2)),
            motor1_ca: i16::from_be_bytes(word(3)),
            motor2_ca: i16::from_be_bytes(word(4)),
        }
    }
}

/// Vehicle readings in fixed point: tenths of a volt or degree, hundredths of an amp.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Telemetry {
    pub battery_dv: u16,
    pub temp1_dc: u16,
    pub temp2_dc: u16,
    pub motor1_ca: i16,
    pub motor2_ca: i16,
}

impl Telemetry {
    pub fn encode(&self) -> AckPacket {
        let mut bytes = [0u8; AckPacket::LEN];
        bytes[0..2].copy_from_slice(&self.battery_dv.to_be_bytes());
        bytes[2..4].copy_from_slice(&self.temp1_dc.to_be_bytes());
        bytes[4..6].copy_from_slice(&self.temp2_dc.to_be_bytes());
        bytes[6..8].copy_from_slice(&self.motor1_ca.to_be_bytes());
        bytes[8..10].copy_from_slice(&self.motor2_ca.to_be_bytes());
        AckPacket { bytes }
    }
}
