use crate::{ClientContext, ClientError, InterfaceId, MockControlMsg, RawReportHandler, ReportKind};
use rust_osvr_api::utils;
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;
use std::sync::mpsc::{Receiver, TryRecvError};

/// Display descriptor served under `/display` until replaced: a 1920x1080
/// side by side headset.
pub const DEFAULT_DISPLAY: &str = r#"{
    "hmd": {
        "device": {
            "vendor": "OSVR",
            "model": "Mock HMD",
            "num_displays": 1,
            "Version": "1.0",
            "Note": "In-process mock"
        },
        "field_of_view": {
            "monocular_horizontal": 90,
            "monocular_vertical": 90,
            "overlap_percent": 100,
            "pitch_tilt": 0
        },
        "resolutions": [
            {
                "width": 1920,
                "height": 1080,
                "video_inputs": 1,
                "display_mode": "horz_side_by_side",
                "swap_eyes": 0
            }
        ],
        "distortion": { "k1_red": 0, "k1_green": 0, "k1_blue": 0 },
        "rendering": { "right_roll": 0, "left_roll": 0 },
        "eyes": [
            { "center_proj_x": 0.5, "center_proj_y": 0.5, "rotate_180": 0 },
            { "center_proj_x": 0.5, "center_proj_y": 0.5, "rotate_180": 0 }
        ]
    }
}"#;

/// Observable state of a mock context, shared with tests.
#[derive(Debug, Default)]
pub struct MockState {
    parameters: HashMap<String, String>,
    open_interfaces: Vec<String>,
    handlers: HashMap<(String, ReportKind), usize>,
    update_count: u64,
    delivered: u64,
}

impl MockState {
    pub fn parameter(&self, path: &str) -> Option<&str> {
        self.parameters.get(path).map(|s| s.as_str())
    }

    /// Paths of the currently open interfaces, one entry per open handle.
    pub fn open_interfaces(&self) -> &[String] {
        &self.open_interfaces
    }

    pub fn is_open(&self, path: &str) -> bool {
        self.open_interfaces.iter().any(|p| p == path)
    }

    /// Number of native handlers registered for `kind` across open interfaces on `path`.
    pub fn handler_count(&self, path: &str, kind: ReportKind) -> usize {
        self.handlers.get(&(path.to_owned(), kind)).cloned().unwrap_or(0)
    }

    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    /// Number of handler invocations so far.
    pub fn delivered(&self) -> u64 {
        self.delivered
    }
}

struct MockInterface {
    path: String,
    handlers: Vec<(ReportKind, RawReportHandler)>,
}

pub struct MockClientContext {
    app_id: String,
    receiver: Option<Receiver<MockControlMsg>>,
    pending: VecDeque<MockControlMsg>,
    interfaces: HashMap<InterfaceId, MockInterface>,
    state: Rc<RefCell<MockState>>,
}

impl MockClientContext {
    pub fn new(app_id: &str) -> MockClientContext {
        let mut state = MockState::default();
        state.parameters.insert("/display".to_owned(), DEFAULT_DISPLAY.to_owned());
        info!("Mock ClientKit context started for {}", app_id);

        MockClientContext {
            app_id: app_id.to_owned(),
            receiver: None,
            pending: VecDeque::new(),
            interfaces: HashMap::new(),
            state: Rc::new(RefCell::new(state)),
        }
    }

    pub fn new_with_receiver(app_id: &str, rcv: Receiver<MockControlMsg>) -> MockClientContext {
        let mut context = MockClientContext::new(app_id);
        context.receiver = Some(rcv);
        context
    }

    pub fn state_handle(&self) -> Rc<RefCell<MockState>> {
        self.state.clone()
    }

    /// Queues a message, applied on the next `update`.
    pub fn push(&mut self, msg: MockControlMsg) {
        self.pending.push_back(msg);
    }

    fn drain_receiver(&mut self) {
        let mut disconnected = false;
        if let Some(ref rcv) = self.receiver {
            loop {
                match rcv.try_recv() {
                    Ok(msg) => self.pending.push_back(msg),
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        disconnected = true;
                        break;
                    }
                }
            }
        }
        if disconnected {
            debug!("Mock remote disconnected");
            self.receiver = None;
        }
    }

    fn handle_msg(&mut self, msg: MockControlMsg) {
        match msg {
            MockControlMsg::Report(path, report) => {
                let kind = report.kind();
                let mut delivered = 0;
                for iface in self.interfaces.values_mut().filter(|i| i.path == path) {
                    for (_, handler) in iface.handlers.iter_mut().filter(|(k, _)| *k == kind) {
                        handler(&report);
                        delivered += 1;
                    }
                }
                if delivered == 0 {
                    trace!("No {:?} handler on {}", kind, path);
                }
                self.state.borrow_mut().delivered += delivered;
            }
            MockControlMsg::SetParameter(path, value) => {
                self.state.borrow_mut().parameters.insert(path, value);
            }
            MockControlMsg::Disconnect(path) => {
                for iface in self.interfaces.values_mut().filter(|i| i.path == path) {
                    iface.handlers.clear();
                }
                self.sync_state();
            }
        }
    }

    fn sync_state(&mut self) {
        let mut state = self.state.borrow_mut();
        state.open_interfaces = self.interfaces.values().map(|i| i.path.clone()).collect();
        state.open_interfaces.sort();
        state.handlers.clear();
        for iface in self.interfaces.values() {
            for (kind, _) in &iface.handlers {
                *state.handlers.entry((iface.path.clone(), *kind)).or_insert(0) += 1;
            }
        }
    }
}

impl ClientContext for MockClientContext {
    fn app_id(&self) -> &str {
        &self.app_id
    }

    fn update(&mut self) -> Result<(), ClientError> {
        self.drain_receiver();
        while let Some(msg) = self.pending.pop_front() {
            self.handle_msg(msg);
        }
        self.state.borrow_mut().update_count += 1;
        Ok(())
    }

    fn open_interface(&mut self, path: &str) -> Result<InterfaceId, ClientError> {
        let id = InterfaceId(utils::new_id());
        self.interfaces.insert(id, MockInterface {
            path: path.to_owned(),
            handlers: Vec::new(),
        });
        self.sync_state();
        debug!("Opened mock interface {} as {:?}", path, id);
        Ok(id)
    }

    fn register_callback(
        &mut self,
        iface: InterfaceId,
        kind: ReportKind,
        handler: RawReportHandler,
    ) -> Result<(), ClientError> {
        self.interfaces
            .get_mut(&iface)
            .ok_or(ClientError::UnknownInterface(iface))?
            .handlers
            .push((kind, handler));
        self.sync_state();
        Ok(())
    }

    fn close_interface(&mut self, iface: InterfaceId) -> Result<(), ClientError> {
        let entry = self
            .interfaces
            .remove(&iface)
            .ok_or(ClientError::UnknownInterface(iface))?;
        debug!("Closed mock interface {}", entry.path);
        self.sync_state();
        Ok(())
    }

    fn string_parameter(&self, path: &str) -> Result<Option<String>, ClientError> {
        Ok(self.state.borrow().parameter(path).map(|s| s.to_owned()))
    }
}
