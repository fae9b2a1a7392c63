// Node addressing over the automaton body.
//
// Every node is `1 + width` bytes:
// - byte 0: letter (transition label)
// - byte 1: flags in the low 3 bits, followed by the child address
//
// The address is a little-endian integer of `width` bytes starting at byte 1
// (so it shares its low byte with the flags), shifted right by 3.

use crate::image::DictionaryImage;

/// Offset of the flags/address field inside a node.
pub const GOTO_OFFSET: usize = 1;

/// The node terminates a complete stored string.
const FLAG_FINAL: u8 = 0b001;
/// No further siblings follow this node.
const FLAG_LAST: u8 = 0b010;
/// The child node starts right after this node's flags byte.
const FLAG_NEXT: u8 = 0b100;

/// Position of a node in the automaton body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Node(usize);

impl Node {
    /// Offset 0: the automaton root. A child address pointing here means
    /// "no children".
    pub const ROOT: Node = Node(0);

    pub fn offset(self) -> usize {
        self.0
    }
}

/// Stateless addressing primitives over a [`DictionaryImage`].
#[derive(Debug, Clone, Copy)]
pub struct Walker<'a> {
    body: &'a [u8],
    len: usize,
    width: usize,
}

impl<'a> Walker<'a> {
    pub fn new(image: &'a DictionaryImage) -> Self {
        Self {
            body: image.body(),
            len: image.len(),
            width: image.header().address_width,
        }
    }

    #[inline]
    fn byte(&self, pos: usize) -> u8 {
        self.body.get(pos).copied().unwrap_or(0)
    }

    /// Distance between consecutive siblings.
    #[inline]
    pub fn stride(&self) -> usize {
        GOTO_OFFSET + self.width
    }

    /// The node whose child is the first letter level.
    #[inline]
    pub fn start(&self) -> Node {
        Node(self.stride())
    }

    #[inline]
    pub fn letter(&self, node: Node) -> u8 {
        self.byte(node.0)
    }

    #[inline]
    pub fn is_final(&self, node: Node) -> bool {
        self.byte(node.0 + GOTO_OFFSET) & FLAG_FINAL != 0
    }

    #[inline]
    pub fn is_last(&self, node: Node) -> bool {
        self.byte(node.0 + GOTO_OFFSET) & FLAG_LAST != 0
    }

    /// First child of `node`.
    pub fn child(&self, node: Node) -> Node {
        let field = node.0 + GOTO_OFFSET;
        if self.byte(field) & FLAG_NEXT != 0 {
            return Node(field + 1);
        }
        let mut address: u64 = 0;
        for i in 0..self.width {
            address |= u64::from(self.byte(field + i)) << (8 * i);
        }
        Node((address >> 3) as usize)
    }

    /// Iterate `first` and the siblings that follow it.
    pub fn siblings(&self, first: Node) -> Siblings<'a> {
        Siblings {
            walker: *self,
            current: (first.0 < self.len).then_some(first),
        }
    }

    /// Iterate the children of `node`.
    pub fn children(&self, node: Node) -> Siblings<'a> {
        self.siblings(self.child(node))
    }
}

/// Cursor over a run of sibling nodes.
///
/// The node carrying the "last" flag is visited before the cursor is
/// exhausted. A run that reaches the end of the body stops there.
#[derive(Debug, Clone)]
pub struct Siblings<'a> {
    walker: Walker<'a>,
    current: Option<Node>,
}

impl Siblings<'_> {
    pub fn current(&self) -> Option<Node> {
        self.current
    }

    pub fn is_exhausted(&self) -> bool {
        self.current.is_none()
    }

    pub fn advance(&mut self) {
        let Some(node) = self.current else {
            return;
        };
        self.current = if self.walker.is_last(node) {
            None
        } else {
            let next = node.0 + self.walker.stride();
            (next < self.walker.len).then_some(Node(next))
        };
    }
}

impl Iterator for Siblings<'_> {
    type Item = Node;

    fn next(&mut self) -> Option<Node> {
        let node = self.current?;
        self.advance();
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::test_file;

    fn image(width: u8, body: &[u8]) -> DictionaryImage {
        DictionaryImage::from_bytes(&test_file(1, width, body)).unwrap()
    }

    /// Width-2 node: letter, then a u16 holding `(target << 3) | flags`.
    fn node(letter: u8, target: usize, flags: u8) -> [u8; 3] {
        let field = ((target as u16) << 3) | flags as u16;
        let [lo, hi] = field.to_le_bytes();
        [letter, lo, hi]
    }

    fn sample() -> DictionaryImage {
        let mut body = Vec::new();
        body.extend(node(0, 0, 0)); // 0: root
        body.extend(node(0, 6, FLAG_LAST)); // 3: start -> 6
        body.extend(node(b'a', 12, 0)); // 6
        body.extend(node(b'b', 0, FLAG_FINAL | FLAG_LAST)); // 9
        body.extend(node(b'c', 0, FLAG_FINAL | FLAG_LAST | FLAG_NEXT)); // 12
        image(2, &body)
    }

    #[test]
    fn start_follows_root() {
        let img = sample();
        let w = Walker::new(&img);
        assert_eq!(w.stride(), 3);
        assert_eq!(w.start(), Node(3));
        assert_eq!(w.child(w.start()), Node(6));
    }

    #[test]
    fn sibling_scan_includes_last() {
        let img = sample();
        let w = Walker::new(&img);
        let letters: Vec<u8> = w.children(w.start()).map(|n| w.letter(n)).collect();
        assert_eq!(letters, b"ab");
    }

    #[test]
    fn flags_and_packed_address() {
        let img = sample();
        let w = Walker::new(&img);
        assert!(!w.is_final(Node(6)));
        assert!(w.is_final(Node(9)));
        assert!(w.is_last(Node(9)));
        assert_eq!(w.child(Node(6)), Node(12));
        assert_eq!(w.child(Node(9)), Node::ROOT);
    }

    #[test]
    fn adjacent_child() {
        let img = sample();
        let w = Walker::new(&img);
        assert_eq!(w.child(Node(12)), Node(14));
    }

    #[test]
    fn cursor_api() {
        let img = sample();
        let w = Walker::new(&img);
        let mut s = w.siblings(Node(6));
        assert_eq!(s.current(), Some(Node(6)));
        s.advance();
        assert_eq!(s.current(), Some(Node(9)));
        s.advance();
        assert!(s.is_exhausted());
        s.advance();
        assert!(s.is_exhausted());
    }

    #[test]
    fn out_of_range_runs_are_empty() {
        let img = sample();
        let w = Walker::new(&img);
        assert_eq!(w.siblings(Node(1000)).count(), 0);
    }

    #[test]
    fn unterminated_run_stops_at_body_end() {
        let mut body = Vec::new();
        body.extend(node(0, 0, 0));
        body.extend(node(b'x', 0, 0));
        body.extend(node(b'y', 0, 0));
        let img = image(2, &body);
        let w = Walker::new(&img);
        assert_eq!(w.siblings(Node(3)).count(), 2);
    }
}
