use pactguard::{check, contract, ViolationPolicy};

fn nonempty(bytes: &Vec<u8>) -> bool {
    check!(!bytes.is_empty())
}

#[contract(pre = nonempty)]
fn into_len(bytes: Vec<u8>) -> usize {
    bytes.into_iter().count()
}

struct Frame {
    payload: Vec<u8>,
}

impl Frame {
    fn is_sealed(&self) -> bool {
        check!(!self.payload.is_empty())
    }

    #[contract(pre = Self::is_sealed, policy = ViolationPolicy::Raise)]
    fn into_payload(self) -> Vec<u8> {
        self.payload
    }
}

fn main() {
    assert_eq!(into_len(vec![1, 2, 3]), 3);
    let frame = Frame { payload: vec![7] };
    assert_eq!(frame.into_payload(), vec![7]);
}
