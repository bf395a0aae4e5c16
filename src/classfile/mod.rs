//! Minimal reader for compiled `.class` files.
//!
//! Parses just enough of the binary format to recover the class's own
//! qualified name and every class reference recorded in the constant pool.
//! Nothing past the header is interpreted.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassParseError {
    #[error("unexpected end of class file")]
    UnexpectedEof,
    #[error("invalid class file magic header")]
    InvalidMagic,
    #[error("unsupported constant pool tag {tag}")]
    UnsupportedConstant { tag: u8 },
    #[error("invalid constant pool index {index}")]
    InvalidConstantIndex { index: u16 },
    #[error("invalid UTF-8 string in constant pool: {0}")]
    Utf8Decode(#[from] std::string::FromUtf8Error),
}

/// Header-level facts about one compiled class.
///
/// Names are in the internal slash-delimited form exactly as stored in the
/// constant pool, e.g. `java/lang/Object` or `[Ljava/lang/String;`.
#[derive(Debug, Clone)]
pub struct ClassInfo {
    /// The class's own internal name, from the `this_class` entry.
    pub name: String,
    /// Every distinct name recorded in a `CONSTANT_Class` pool entry,
    /// including the class's own and array descriptors.
    pub referenced: Vec<String>,
}

/// Parse the header of a compiled class.
///
/// Validates the magic number and the constant pool structure. Returns an
/// error if the bytes are not a structurally valid class file.
pub fn parse_class(bytes: &[u8]) -> Result<ClassInfo, ClassParseError> {
    let mut reader = ClassReader::new(bytes);
    reader.expect_magic()?;
    let _minor_version = reader.read_u2()?;
    let _major_version = reader.read_u2()?;
    let constant_pool = ConstantPool::parse(&mut reader)?;

    let _access_flags = reader.read_u2()?;
    let this_class = reader.read_u2()?;

    let name = constant_pool.class_name(this_class)?.to_string();

    let mut referenced = Vec::new();
    for entry in &constant_pool.entries {
        if let Constant::Class { name_index } = entry {
            referenced.push(constant_pool.utf8(*name_index)?.to_string());
        }
    }

    Ok(ClassInfo { name, referenced })
}

#[derive(Debug, Clone)]
enum Constant {
    Utf8(String),
    Class { name_index: u16 },
    Other,
    Unusable,
}

struct ConstantPool {
    entries: Vec<Constant>,
}

impl ConstantPool {
    fn parse(reader: &mut ClassReader<'_>) -> Result<Self, ClassParseError> {
        let count = reader.read_u2()? as usize;
        let mut entries = Vec::with_capacity(count);
        entries.push(Constant::Unusable); // index 0 unused

        let mut index = 1;
        while index < count {
            let tag = reader.read_u1()?;
            let entry = match tag {
                1 => {
                    let length = reader.read_u2()? as usize;
                    let bytes = reader.read_slice(length)?;
                    let string = String::from_utf8(bytes.to_vec())?;
                    Constant::Utf8(string)
                }
                3 | 4 => {
                    reader.skip(4)?;
                    Constant::Other
                }
                5 | 6 => {
                    // longs and doubles occupy two pool slots
                    reader.skip(8)?;
                    entries.push(Constant::Unusable);
                    index += 1;
                    Constant::Other
                }
                7 => {
                    let name_index = reader.read_u2()?;
                    Constant::Class { name_index }
                }
                8 => {
                    reader.read_u2()?; // string index
                    Constant::Other
                }
                9 | 10 | 11 => {
                    reader.skip(4)?;
                    Constant::Other
                }
                12 => {
                    reader.read_u2()?;
                    reader.read_u2()?;
                    Constant::Other
                }
                15 => {
                    reader.skip(3)?;
                    Constant::Other
                }
                16 => {
                    reader.read_u2()?;
                    Constant::Other
                }
                17 | 18 => {
                    reader.skip(4)?;
                    Constant::Other
                }
                19 | 20 => {
                    reader.read_u2()?; // module or package name index
                    Constant::Other
                }
                other => return Err(ClassParseError::UnsupportedConstant { tag: other }),
            };

            entries.push(entry);
            index += 1;
        }

        Ok(Self { entries })
    }

    fn get(&self, index: u16) -> Result<&Constant, ClassParseError> {
        self.entries
            .get(index as usize)
            .ok_or(ClassParseError::InvalidConstantIndex { index })
    }

    fn utf8(&self, index: u16) -> Result<&str, ClassParseError> {
        match self.get(index)? {
            Constant::Utf8(value) => Ok(value.as_str()),
            _ => Err(ClassParseError::InvalidConstantIndex { index }),
        }
    }

    fn class_name(&self, index: u16) -> Result<&str, ClassParseError> {
        match self.get(index)? {
            Constant::Class { name_index } => self.utf8(*name_index),
            _ => Err(ClassParseError::InvalidConstantIndex { index }),
        }
    }
}

struct ClassReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ClassReader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn expect_magic(&mut self) -> Result<(), ClassParseError> {
        const MAGIC: u32 = 0xCAFEBABE;
        let magic = self.read_u4()?;
        if magic != MAGIC {
            return Err(ClassParseError::InvalidMagic);
        }
        Ok(())
    }

    fn read_u1(&mut self) -> Result<u8, ClassParseError> {
        if self.pos >= self.data.len() {
            return Err(ClassParseError::UnexpectedEof);
        }
        let value = self.data[self.pos];
        self.pos += 1;
        Ok(value)
    }

    fn read_u2(&mut self) -> Result<u16, ClassParseError> {
        if self.pos + 2 > self.data.len() {
            return Err(ClassParseError::UnexpectedEof);
        }
        let value = u16::from_be_bytes([self.data[self.pos], self.data[self.pos + 1]]);
        self.pos += 2;
        Ok(value)
    }

    fn read_u4(&mut self) -> Result<u32, ClassParseError> {
        if self.pos + 4 > self.data.len() {
            return Err(ClassParseError::UnexpectedEof);
        }
        let value = u32::from_be_bytes([
            self.data[self.pos],
            self.data[self.pos + 1],
            self.data[self.pos + 2],
            self.data[self.pos + 3],
        ]);
        self.pos += 4;
        Ok(value)
    }

    fn read_slice(&mut self, len: usize) -> Result<&'a [u8], ClassParseError> {
        if self.pos + len > self.data.len() {
            return Err(ClassParseError::UnexpectedEof);
        }
        let slice = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    fn skip(&mut self, len: usize) -> Result<(), ClassParseError> {
        if self.pos + len > self.data.len() {
            return Err(ClassParseError::UnexpectedEof);
        }
        self.pos += len;
        Ok(())
    }
}
