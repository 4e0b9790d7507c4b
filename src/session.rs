// SPDX-FileCopyrightText: Copyright (c) 2018-2025 slowtec GmbH <post@slowtec.de>
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request/response bookkeeping on a half-duplex line.

use std::{
    fmt, io,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::{Duration, Instant},
};

use parking_lot::RwLock;

use crate::{
    codec::rtu::{self, Decoder},
    config::SessionConfig,
    error::{Error, Result},
    frame::{Command, Response, ResponseKind},
    util::HexBytes,
};

/// Carries encoded frames to the device.
pub trait Transport {
    fn write_frame(&mut self, frame: &[u8]) -> io::Result<()>;
}

impl<W: io::Write> Transport for W {
    fn write_frame(&mut self, frame: &[u8]) -> io::Result<()> {
        self.write_all(frame)?;
        self.flush()
    }
}

/// Gets every decoded response.
pub trait Listener: Send + Sync {
    fn on_response(&self, response: &Response);
}

impl<F> Listener for F
where
    F: Fn(&Response) + Send + Sync,
{
    fn on_response(&self, response: &Response) {
        self(response);
    }
}

/// Handle of a subscribed [`Listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type ListenerList = Vec<(ListenerId, Arc<dyn Listener>)>;

/// Copy-on-write list of listeners.
///
/// Delivery iterates over a snapshot, so listeners may be added or removed
/// while responses are handed out.
#[derive(Default)]
struct Subscribers {
    next_id: AtomicU64,
    list: RwLock<Arc<ListenerList>>,
}

impl Subscribers {
    fn add(&self, listener: Arc<dyn Listener>) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let mut list = self.list.write();
        let mut next = ListenerList::clone(&list);
        next.push((id, listener));
        *list = Arc::new(next);
        id
    }

    fn remove(&self, id: ListenerId) -> bool {
        let mut list = self.list.write();
        if !list.iter().any(|(x, _)| *x == id) {
            return false;
        }
        let next = list.iter().filter(|(x, _)| *x != id).cloned().collect();
        *list = Arc::new(next);
        true
    }

    fn snapshot(&self) -> Arc<ListenerList> {
        Arc::clone(&self.list.read())
    }
}

/// Talks to a single charge controller.
///
/// At most one request is outstanding: its [`ResponseKind`] tells the next
/// [`Session::receive`] pass how to decode read responses.
pub struct Session<T> {
    transport: T,
    config: SessionConfig,
    pending: Option<ResponseKind>,
    last_sent: Option<Instant>,
    subscribers: Subscribers,
}

impl<T> fmt::Debug for Session<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("config", &self.config)
            .field("pending", &self.pending)
            .field("last_sent", &self.last_sent)
            .field("listeners", &self.subscribers.snapshot().len())
            .finish_non_exhaustive()
    }
}

impl<T: Transport> Session<T> {
    #[must_use]
    pub fn new(transport: T, config: SessionConfig) -> Self {
        Self {
            transport,
            config,
            pending: None,
            last_sent: None,
            subscribers: Subscribers::default(),
        }
    }

    /// Register a listener for all decoded responses.
    pub fn subscribe<L>(&self, listener: L) -> ListenerId
    where
        L: Listener + 'static,
    {
        self.subscribers.add(Arc::new(listener))
    }

    /// Returns `false` if the listener was not subscribed.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        self.subscribers.remove(id)
    }

    /// Encode and write a command.
    ///
    /// Fails without writing anything while another request is pending or
    /// the guard interval since the previous request has not elapsed.
    pub fn send(&mut self, cmd: &Command) -> Result<()> {
        if let Some(kind) = self.pending {
            return Err(Error::Pending(kind));
        }
        let remaining = self.ready_in();
        if !remaining.is_zero() {
            return Err(Error::GuardInterval(remaining));
        }
        let frame = rtu::encode(cmd)?;
        log::trace!("Sending {:?} request: {}", cmd.kind(), HexBytes(&frame));
        self.transport.write_frame(&frame)?;
        self.last_sent = Some(Instant::now());
        self.pending = Some(cmd.kind());
        Ok(())
    }

    /// Decode a received chunk and hand every response to the listeners
    /// before the next frame is decoded.
    ///
    /// The pending request is settled once the pass has consumed a frame or
    /// failed on a broken one. An empty chunk leaves it untouched.
    pub fn receive(&mut self, buf: &[u8]) -> Vec<Response> {
        if buf.is_empty() {
            return Vec::new();
        }
        log::trace!("Received {} byte(s): {}", buf.len(), HexBytes(buf));
        let listeners = self.subscribers.snapshot();
        if listeners.is_empty() {
            log::info!("No listener registered");
        }
        let mut decoder = Decoder::new(buf, self.pending);
        let mut responses = Vec::new();
        for rsp in decoder.by_ref() {
            for (_, listener) in listeners.iter() {
                listener.on_response(&rsp);
            }
            responses.push(rsp);
        }
        if decoder.position() > 0 || decoder.error().is_some() {
            self.pending = None;
        }
        responses
    }
}

impl<T> Session<T> {
    /// Forget the outstanding request, e.g. after a response timeout.
    pub fn cancel_pending(&mut self) -> Option<ResponseKind> {
        self.pending.take()
    }

    /// The response kind of the outstanding request.
    #[must_use]
    pub const fn pending(&self) -> Option<ResponseKind> {
        self.pending
    }

    /// Time left until the guard interval has elapsed.
    #[must_use]
    pub fn ready_in(&self) -> Duration {
        self.last_sent.map_or(Duration::ZERO, |sent| {
            self.config.guard_interval.saturating_sub(sent.elapsed())
        })
    }

    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn into_inner(self) -> T {
        self.transport
    }
}

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;

    use super::*;
    use crate::{
        codec::checksum,
        frame::{BatterySystem, FunctionCode},
    };

    fn session() -> Session<Vec<u8>> {
        let config = SessionConfig {
            guard_interval: Duration::ZERO,
            ..Default::default()
        };
        Session::new(Vec::new(), config)
    }

    fn with_crc(bytes: &[u8]) -> Vec<u8> {
        let mut frame = bytes.to_vec();
        frame.extend_from_slice(&[0, 0]);
        checksum::write(&mut frame).unwrap();
        frame
    }

    #[test]
    fn send_writes_the_frame() {
        let mut session = session();
        session
            .send(&Command::battery_charging_discharging_status())
            .unwrap();
        assert_eq!(
            session.transport(),
            &[0x01, 0x04, 0x32, 0x00, 0x00, 0x03, 0xBE, 0xB3]
        );
        assert_eq!(
            session.pending(),
            Some(ResponseKind::BatteryChargingDischargingStatus)
        );
    }

    #[test]
    fn reject_second_request_while_pending() {
        let mut session = session();
        session.send(&Command::battery_system()).unwrap();
        assert!(matches!(
            session.send(&Command::rated_load()),
            Err(Error::Pending(ResponseKind::BatterySystem))
        ));
        assert_eq!(session.transport().len(), 8);

        assert_eq!(session.cancel_pending(), Some(ResponseKind::BatterySystem));
        session.send(&Command::rated_load()).unwrap();
        assert_eq!(session.transport().len(), 16);
    }

    #[test]
    fn respect_guard_interval() {
        let config = SessionConfig {
            guard_interval: Duration::from_secs(60),
            ..Default::default()
        };
        let mut session = Session::new(Vec::new(), config);
        assert_eq!(session.ready_in(), Duration::ZERO);
        session.send(&Command::load_on(true)).unwrap();
        session.receive(&with_crc(&[0x01, 0x05, 0x00, 0x02, 0xFF, 0x00]));
        assert!(matches!(
            session.send(&Command::load_on(false)),
            Err(Error::GuardInterval(_))
        ));
        assert!(session.ready_in() > Duration::ZERO);
    }

    #[test]
    fn receive_decodes_with_the_pending_kind() {
        let mut session = session();
        session.send(&Command::battery_system()).unwrap();
        let rsps = session.receive(&with_crc(&[0x01, 0x04, 0x02, 0x0B, 0xB8]));
        assert_eq!(
            rsps,
            vec![Response::BatterySystem(BatterySystem { voltage: 30.0 })]
        );
        assert_eq!(session.pending(), None);

        // nothing pending anymore
        let buf = with_crc(&[0x01, 0x04, 0x02, 0x0B, 0xB8]);
        assert_eq!(session.receive(&buf), vec![Response::Generic(buf.clone())]);
    }

    #[test]
    fn empty_chunk_keeps_the_pending_kind() {
        let mut session = session();
        session.send(&Command::battery_system()).unwrap();
        assert!(session.receive(&[]).is_empty());
        assert_eq!(session.pending(), Some(ResponseKind::BatterySystem));

        let rsps = session.receive(&with_crc(&[0x01, 0x04, 0x02, 0x0B, 0xB8]));
        assert_eq!(
            rsps,
            vec![Response::BatterySystem(BatterySystem { voltage: 30.0 })]
        );
        assert_eq!(session.pending(), None);
    }

    #[test]
    fn broken_chunk_settles_the_pending_kind() {
        let mut session = session();
        session.send(&Command::battery_system()).unwrap();
        // truncated read response
        assert!(session.receive(&[0x01, 0x04, 0x02, 0x0B]).is_empty());
        assert_eq!(session.pending(), None);
    }

    #[test]
    fn fan_out_in_order() {
        let mut session = session();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let first = {
            let seen = Arc::clone(&seen);
            session.subscribe(move |rsp: &Response| seen.lock().push((1, rsp.clone())))
        };
        {
            let seen = Arc::clone(&seen);
            session.subscribe(move |rsp: &Response| seen.lock().push((2, rsp.clone())));
        }

        let mut buf = with_crc(&[0x01, 0x10, 0x90, 0x13, 0x00, 0x03]);
        buf.extend(with_crc(&[0x01, 0x05, 0x00, 0x02, 0xFF, 0x00]));
        session.receive(&buf);

        let ok_multi = Response::Ok(FunctionCode::WriteMultipleRegisters);
        let ok_coil = Response::Ok(FunctionCode::WriteSingleCoil);
        assert_eq!(
            *seen.lock(),
            vec![
                (1, ok_multi.clone()),
                (2, ok_multi.clone()),
                (1, ok_coil.clone()),
                (2, ok_coil),
            ]
        );

        assert!(session.unsubscribe(first));
        assert!(!session.unsubscribe(first));
        seen.lock().clear();
        session.receive(&buf);
        assert_eq!(seen.lock().len(), 2);
        assert!(seen.lock().iter().all(|(id, _)| *id == 2));
    }

    #[test]
    fn deliver_frames_before_a_broken_one() {
        let mut session = session();
        let seen = Arc::new(Mutex::new(0));
        {
            let seen = Arc::clone(&seen);
            session.subscribe(move |_: &Response| *seen.lock() += 1);
        }
        let mut buf = with_crc(&[0x01, 0x05, 0x00, 0x02, 0xFF, 0x00]);
        buf.extend_from_slice(&[0x01, 0x04, 0x02, 0x0B]);
        assert_eq!(session.receive(&buf).len(), 1);
        assert_eq!(*seen.lock(), 1);
    }

    struct Broken;

    impl io::Write for Broken {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "port closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn transport_failure() {
        let mut session = Session::new(Broken, SessionConfig::default());
        assert!(matches!(
            session.send(&Command::clock()),
            Err(Error::Io(_))
        ));
        assert_eq!(session.pending(), None);
        assert_eq!(session.ready_in(), Duration::ZERO);
    }
}
