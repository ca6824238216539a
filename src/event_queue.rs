// ---------------------------------------------------------------------------------
//
//       .-~~~-.
//      /   |   \       Protractor Widget Library
//     '----o----'
//
// MIT License
// https://github.com/protractor-widget/protractor/blob/main/LICENSE
//
// ---------------------------------------------------------------------------------

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

const INITIAL_CAPACITY: usize = 16;

/// Construct a single-threaded unbounded event channel.
///
/// The control keeps the sending half and pushes notifications while it
/// handles input; the host drains the receiving half afterwards. All
/// delivery happens on the control's owning thread, so the transport is a
/// plain `Rc<RefCell<VecDeque>>` rather than a sync channel.
pub fn event_channel<E>() -> (EventSender<E>, EventReceiver<E>) {
    let queue = Rc::new(RefCell::new(VecDeque::with_capacity(INITIAL_CAPACITY)));

    (
        EventSender {
            queue: Rc::clone(&queue),
        },
        EventReceiver { queue },
    )
}

/// The sending end of the event channel.
pub struct EventSender<E> {
    queue: Rc<RefCell<VecDeque<E>>>,
}

impl<E> EventSender<E> {
    #[inline]
    pub fn send(&mut self, event: E) {
        RefCell::borrow_mut(&self.queue).push_back(event);
    }
}

impl<E> Clone for EventSender<E> {
    fn clone(&self) -> Self {
        Self {
            queue: Rc::clone(&self.queue),
        }
    }
}

/// The receiving end of the event channel.
pub struct EventReceiver<E> {
    queue: Rc<RefCell<VecDeque<E>>>,
}

impl<E> EventReceiver<E> {
    #[inline]
    pub fn try_recv(&mut self) -> Option<E> {
        RefCell::borrow_mut(&self.queue).pop_front()
    }

    pub fn is_empty(&self) -> bool {
        RefCell::borrow(&self.queue).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_arrive_in_send_order() {
        let (mut tx, mut rx) = event_channel();
        assert!(rx.is_empty());

        tx.send(1);
        tx.send(2);
        tx.send(3);

        assert_eq!(rx.try_recv(), Some(1));
        assert_eq!(rx.try_recv(), Some(2));
        assert_eq!(rx.try_recv(), Some(3));
        assert_eq!(rx.try_recv(), None);
    }

    #[test]
    fn test_cloned_senders_share_the_queue() {
        let (mut tx, mut rx) = event_channel();
        let mut tx2 = tx.clone();

        tx.send("a");
        tx2.send("b");

        assert_eq!(rx.try_recv(), Some("a"));
        assert_eq!(rx.try_recv(), Some("b"));
    }
}
