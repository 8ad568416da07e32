use bytes::BufMut;

/// Integer signess in postgres docs is awful.
pub trait UsizeExt {
    /// length is usize in rust, while postgres message length is u32,
    /// this will panic when overflow instead of wrapping
    fn to_u32(self) -> u32;
}

impl UsizeExt for usize {
    fn to_u32(self) -> u32 {
        self.try_into().expect("message size too large for protocol")
    }
}

pub trait StrExt {
    /// postgres String must be nul terminated
    fn nul_string_len(&self) -> u32;

    /// the string up to the first nul, which would end a postgres String early
    fn until_nul(&self) -> &str;
}

impl StrExt for str {
    fn nul_string_len(&self) -> u32 {
        self.len().to_u32() + 1/* nul */
    }

    fn until_nul(&self) -> &str {
        match self.find('\0') {
            Some(end) => &self[..end],
            None => self,
        }
    }
}

pub trait BufMutExt {
    /// postgres String must be nul terminated
    fn put_nul_string(&mut self, string: &str);
}

impl<B: BufMut> BufMutExt for B {
    fn put_nul_string(&mut self, string: &str) {
        self.put(string.as_bytes());
        self.put_u8(b'\0');
    }
}
