use super::crossterm_io::key_to_pad;

use crossterm::event::{poll, read, Event, KeyCode, KeyEvent, KeyModifiers};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// What the user asked for through the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostInput {
    Quit,
    Pad(u8),
}

/// Listens for terminal key events on its own thread and hands them
/// to the main loop over a channel.
pub struct KeyManager {
    stop: Arc<AtomicBool>,
    receiver: Receiver<HostInput>,
    event_listener: Option<JoinHandle<()>>,
}

impl KeyManager {
    // Start event listener thread
    pub fn new() -> KeyManager {
        let (sender, receiver) = channel();
        let stop = Arc::new(AtomicBool::new(false));
        let event_listener = event_listener(sender, stop.clone());
        KeyManager {
            stop,
            receiver,
            event_listener: Some(event_listener),
        }
    }

    /// Take every input received since the last call.
    pub fn drain(&self) -> Vec<HostInput> {
        self.receiver.try_iter().collect()
    }
}

impl Drop for KeyManager {
    fn drop(&mut self) {
        // Tell the event listener to stop, and wait for it
        self.stop.store(true, Ordering::SeqCst);
        if let Some(handle) = self.event_listener.take() {
            let _ = handle.join();
        }
    }
}

fn translate(event: KeyEvent) -> Option<HostInput> {
    match event {
        KeyEvent { code: KeyCode::Esc, .. } => Some(HostInput::Quit),
        KeyEvent {
            code: KeyCode::Char('c'),
            modifiers,
        } if modifiers.contains(KeyModifiers::CONTROL) => Some(HostInput::Quit),
        KeyEvent { code, .. } => key_to_pad(code).map(HostInput::Pad),
    }
}

/// Starts a thread that listens for key events and sends them to `sender`.
fn event_listener(sender: Sender<HostInput>, stop: Arc<AtomicBool>) -> JoinHandle<()> {
    thread::spawn(move || {
        while !stop.load(Ordering::SeqCst) {
            match poll(POLL_INTERVAL) {
                Ok(false) => continue,
                Ok(true) => {}
                Err(e) => {
                    log::error!("Could not poll for events: {}", e);
                    break;
                }
            }

            let event = match read() {
                Ok(event) => event,
                Err(e) => {
                    log::error!("Could not read event: {}", e);
                    break;
                }
            };
            log::trace!("Got event {:?}", event);

            if let Event::Key(key_event) = event {
                if let Some(input) = translate(key_event) {
                    // The receiver is gone, so nobody is listening anymore
                    if sender.send(input).is_err() {
                        break;
                    }
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn escape_and_ctrl_c_quit() {
        assert_eq!(
            Some(HostInput::Quit),
            translate(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE))
        );
        assert_eq!(
            Some(HostInput::Quit),
            translate(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
        );
    }

    #[test]
    fn pad_keys_are_translated() {
        assert_eq!(
            Some(HostInput::Pad(0xB)),
            translate(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE))
        );
        assert_eq!(None, translate(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE)));
    }
}
