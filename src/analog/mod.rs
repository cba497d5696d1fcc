pub mod normalize;
pub mod wizard;

pub use normalize::{
    normalize, AnalogCalData, AnalogCalTable, AnalogChannel, ChannelSpec, OutputRange,
};
pub use wizard::{
    AnalogCalDispatch, AnalogCalError, AnalogCalIo, AnalogCalSequencer, AnalogCalStep,
};
