pub mod clock;
pub mod driver;
pub mod state;
pub mod tick;

pub use clock::{ClockPhase, SimulationClock};
pub use driver::{event_channel, Driver, EventReceiver, EventSender, SimEvent};
pub use state::SimulationState;
pub use tick::{run_simulation_tick, TickReport};
