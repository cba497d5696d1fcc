use embedded_hal::delay::DelayNs;
use rc_handset::{
    analog::{AnalogCalStep, AnalogChannel},
    config::{TouchConfig, TS_MAXX, TS_MAXY, TS_MINX, TS_MINY, SCREEN_H, SCREEN_W},
    link::{AckPacket, ControlPacket, Telemetry, Transport},
    platform::{AnalogInput, TouchInput},
    render::{Color, Rect, Renderer},
    touch::RawTouch,
    ui::ScreenId,
    Collaborators, Handset,
};

#[derive(Default)]
struct Screen {
    texts: Vec<String>,
    full_redraws: usize,
}

impl Renderer for Screen {
    fn fill_screen(&mut self, _color: Color) {
        self.full_redraws += 1;
    }

    fn fill_rect(&mut self, _rect: Rect, _color: Color) {}

    fn draw_rect(&mut self, _rect: Rect, _color: Color) {}

    fn draw_text(&mut self, _x: i16, _y: i16, text: &str, _color: Color) {
        self.texts.push(text.to_owned());
    }

    fn draw_crosshair(&mut self, _x: i16, _y: i16, _color: Color) {}
}

#[derive(Default)]
struct Panel {
    contact: Option<RawTouch>,
}

impl TouchInput for Panel {
    fn read_touch(&mut self) -> RawTouch {
        self.contact.take().unwrap_or_default()
    }
}

struct Sticks {
    values: [i32; 2],
}

impl AnalogInput for Sticks {
    fn read_analog(&mut self, channel: AnalogChannel) -> i32 {
        self.values[channel.index()]
    }
}

struct NoDelay;

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

#[derive(Default)]
struct Radio {
    sent: Vec<ControlPacket>,
    ack: Option<AckPacket>,
    fail: bool,
}

impl Transport for Radio {
    type Error = ();

    fn send(&mut self, packet: &ControlPacket) -> Result<(), Self::Error> {
        if self.fail {
            return Err(());
        }
        self.sent.push(*packet);
        Ok(())
    }

    fn try_receive_ack(&mut self) -> Option<AckPacket> {
        self.ack.take()
    }
}

struct Bench {
    screen: Screen,
    panel: Panel,
    sticks: Sticks,
    delay: NoDelay,
    radio: Radio,
    now_ms: u64,
}

impl Bench {
    fn new() -> Self {
        Self {
            screen: Screen::default(),
            panel: Panel::default(),
            sticks: Sticks { values: [512, 512] },
            delay: NoDelay,
            radio: Radio::default(),
            now_ms: 0,
        }
    }

    fn begin(&mut self, handset: &mut Handset) {
        let mut io = Collaborators {
            renderer: &mut self.screen,
            touch: &mut self.panel,
            adc: &mut self.sticks,
            delay: &mut self.delay,
            transport: &mut self.radio,
        };
        handset.begin(&mut io);
    }

    fn tick(&mut self, handset: &mut Handset) -> ControlPacket {
        self.now_ms += 20;
        let mut io = Collaborators {
            renderer: &mut self.screen,
            touch: &mut self.panel,
            adc: &mut self.sticks,
            delay: &mut self.delay,
            transport: &mut self.radio,
        };
        handset.tick(self.now_ms, &mut io)
    }

    /// Press and lift at a screen position under the default panel mapping,
    /// then wait out the debounce window.
    fn tap(&mut self, handset: &mut Handset, x: i16, y: i16) {
        let raw_x = TS_MINX as i32 + x as i32 * (TS_MAXX - TS_MINX) as i32 / SCREEN_W as i32;
        let raw_y = TS_MINY as i32 + y as i32 * (TS_MAXY - TS_MINY) as i32 / SCREEN_H as i32;
        self.panel.contact = Some(RawTouch {
            x: raw_x as i16,
            y: raw_y as i16,
            pressure: 400,
        });
        self.tick(handset);
        self.tick(handset);
        self.now_ms += 300;
    }

    fn set_stick(&mut self, channel: AnalogChannel, raw: i32) {
        self.sticks.values[channel.index()] = raw;
    }
}

#[test]
fn begin_draws_home_and_idle_ticks_stream_packets() {
    let mut handset = Handset::new(TouchConfig::default()).unwrap();
    let mut bench = Bench::new();
    bench.begin(&mut handset);

    assert_eq!(handset.active_screen(), ScreenId::Home);
    assert_eq!(bench.screen.full_redraws, 1);
    assert!(bench.screen.texts.iter().any(|t| t == "Status"));

    bench.set_stick(AnalogChannel::Throttle, 0);
    bench.set_stick(AnalogChannel::Steering, 1023);
    let packet = bench.tick(&mut handset);

    assert_eq!(packet.to_bytes(), [127, 127]);
    assert_eq!(bench.radio.sent, [packet]);
}

#[test]
fn m_stop_holds_throttle_until_released() {
    let mut handset = Handset::new(TouchConfig::default()).unwrap();
    let mut bench = Bench::new();
    bench.begin(&mut handset);
    bench.set_stick(AnalogChannel::Throttle, 0);
    bench.set_stick(AnalogChannel::Steering, 0);

    bench.tap(&mut handset, 120, 242);
    assert!(handset.stop_engaged());
    assert_eq!(bench.tick(&mut handset).to_bytes(), [64, 0]);
    assert!(bench.screen.texts.iter().any(|t| t == "RESUME"));

    bench.tap(&mut handset, 120, 242);
    assert!(!handset.stop_engaged());
    assert_eq!(bench.tick(&mut handset).to_bytes(), [127, 0]);
}

#[test]
fn ack_payload_reaches_the_status_panel() {
    let mut handset = Handset::new(TouchConfig::default()).unwrap();
    let mut bench = Bench::new();
    bench.begin(&mut handset);

    let telemetry = Telemetry {
        battery_dv: 185,
        temp1_dc: 225,
        temp2_dc: 231,
        motor1_ca: 521,
        motor2_ca: -12,
    };
    bench.radio.ack = Some(telemetry.encode());
    bench.tick(&mut handset);

    assert_eq!(handset.telemetry(), Some(&telemetry));
    for text in ["18.5V", "22.5C", "23.1C", "5.21A", "-0.12A"] {
        assert!(bench.screen.texts.iter().any(|t| t == text), "{text}");
    }
}

#[test]
fn send_failures_do_not_stall_the_loop() {
    let mut handset = Handset::new(TouchConfig::default()).unwrap();
    let mut bench = Bench::new();
    bench.begin(&mut handset);
    bench.radio.fail = true;

    bench.tick(&mut handset);
    bench.tap(&mut handset, 120, 292);

    assert_eq!(handset.active_screen(), ScreenId::Setup);
    assert!(bench.radio.sent.is_empty());
}

#[test]
fn steering_calibration_end_to_end() {
    let mut handset = Handset::new(TouchConfig::default()).unwrap();
    let mut bench = Bench::new();
    bench.begin(&mut handset);

    bench.tap(&mut handset, 120, 292);
    bench.tap(&mut handset, 120, 137);
    assert_eq!(handset.active_screen(), ScreenId::CalibrateSteering);
    assert_eq!(
        handset.navigator().analog_wizard().step(),
        AnalogCalStep::Center
    );

    // The vehicle is held at rest while the stick is swept.
    bench.set_stick(AnalogChannel::Steering, 1000);
    assert_eq!(bench.tick(&mut handset), ControlPacket::default());

    for raw in [520, 60, 980] {
        bench.set_stick(AnalogChannel::Steering, raw);
        bench.tap(&mut handset, 120, 222);
    }
    assert_eq!(
        handset.navigator().analog_wizard().step(),
        AnalogCalStep::Done
    );
    let data = handset.analog_calibration().get(AnalogChannel::Steering);
    assert!(data.calibrated);
    assert_eq!((data.cal_center, data.cal_min, data.cal_max), (520, 60, 980));

    bench.tap(&mut handset, 120, 222);
    bench.tap(&mut handset, 120, 280);
    assert_eq!(handset.active_screen(), ScreenId::Setup);
    bench.tap(&mut handset, 120, 285);
    assert_eq!(handset.active_screen(), ScreenId::Home);

    bench.set_stick(AnalogChannel::Steering, 525);
    assert_eq!(bench.tick(&mut handset).steering, 64);
    bench.set_stick(AnalogChannel::Steering, 980);
    assert_eq!(bench.tick(&mut handset).steering, 127);
    bench.set_stick(AnalogChannel::Steering, 60);
    assert_eq!(bench.tick(&mut handset).steering, 0);
}
