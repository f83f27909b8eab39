use input_event::codes::{ABS_CNT, BUS_USB};

use crate::{
    abi::{self, InputId, UinputUserDev},
    UinputError,
};

/// Name and ids the kernel reports for the virtual device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceIdentity {
    pub name: String,
    pub vendor: u16,
    pub product: u16,
    pub version: u16,
}

impl DeviceIdentity {
    pub fn new(name: impl Into<String>, vendor: u16, product: u16, version: u16) -> Self {
        DeviceIdentity {
            name: name.into(),
            vendor,
            product,
            version,
        }
    }

    fn input_id(&self) -> InputId {
        InputId {
            bustype: BUS_USB,
            vendor: self.vendor,
            product: self.product,
            version: self.version,
        }
    }
}

/// Minimum and maximum per absolute axis, indexed by axis code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisRanges {
    min: [i32; ABS_CNT],
    max: [i32; ABS_CNT],
}

impl Default for AxisRanges {
    fn default() -> Self {
        Self::uniform(0, 0)
    }
}

impl AxisRanges {
    /// Builds the table from caller-provided sequences, each of which must hold
    /// exactly `ABS_CNT` values.
    pub fn new(min: &[i32], max: &[i32]) -> Result<Self, UinputError> {
        Ok(AxisRanges {
            min: to_table("min", min)?,
            max: to_table("max", max)?,
        })
    }

    pub fn uniform(min: i32, max: i32) -> Self {
        AxisRanges {
            min: [min; ABS_CNT],
            max: [max; ABS_CNT],
        }
    }

    pub fn set(&mut self, axis: u16, min: i32, max: i32) -> Result<(), UinputError> {
        let index = usize::from(axis);
        if index >= ABS_CNT {
            return Err(UinputError::AxisOutOfRange(axis));
        }
        self.min[index] = min;
        self.max[index] = max;
        Ok(())
    }

    pub fn min(&self) -> &[i32; ABS_CNT] {
        &self.min
    }

    pub fn max(&self) -> &[i32; ABS_CNT] {
        &self.max
    }
}

fn to_table(table: &'static str, values: &[i32]) -> Result<[i32; ABS_CNT], UinputError> {
    values
        .try_into()
        .map_err(|_| UinputError::AxisTableLength {
            table,
            actual: values.len(),
            expected: ABS_CNT,
        })
}

/// Populates a zero-initialized `uinput_user_dev` from identity and ranges.
pub fn build(identity: &DeviceIdentity, ranges: &AxisRanges) -> UinputUserDev {
    let mut dev = UinputUserDev::zeroed();
    dev.name = abi::encode_name(&identity.name);
    dev.id = identity.input_id();
    dev.absmin = ranges.min;
    dev.absmax = ranges.max;
    dev
}

#[cfg(test)]
mod test {
    use crate::abi::UINPUT_MAX_NAME_SIZE;

    use super::*;

    #[test]
    fn table_of_wrong_length_is_rejected() {
        let short = vec![0; ABS_CNT - 1];
        let exact = vec![0; ABS_CNT];
        let long = vec![0; ABS_CNT + 1];

        assert!(matches!(
            AxisRanges::new(&short, &exact),
            Err(UinputError::AxisTableLength { table: "min", actual, expected: ABS_CNT }) if actual == ABS_CNT - 1
        ));
        assert!(matches!(
            AxisRanges::new(&exact, &long),
            Err(UinputError::AxisTableLength { table: "max", actual, .. }) if actual == ABS_CNT + 1
        ));
        assert!(AxisRanges::new(&exact, &exact).is_ok());
    }

    #[test]
    fn set_rejects_codes_past_the_table() {
        let mut ranges = AxisRanges::default();
        ranges.set(0x3f, -1, 1).unwrap();
        assert_eq!(ranges.min()[0x3f], -1);
        assert_eq!(ranges.max()[0x3f], 1);

        assert!(matches!(
            ranges.set(0x40, 0, 1),
            Err(UinputError::AxisOutOfRange(0x40))
        ));
    }

    #[test]
    fn descriptor_carries_identity_and_ranges() {
        let identity = DeviceIdentity::new("test-pad", 0x1234, 0x5678, 1);
        let mut ranges = AxisRanges::uniform(0, 255);
        ranges.set(1, -10, 10).unwrap();

        let dev = build(&identity, &ranges);

        assert_eq!(dev.name(), b"test-pad");
        assert_eq!(
            dev.id,
            InputId {
                bustype: BUS_USB,
                vendor: 0x1234,
                product: 0x5678,
                version: 1
            }
        );
        assert_eq!(dev.absmin[0], 0);
        assert_eq!(dev.absmax[0], 255);
        assert_eq!((dev.absmin[1], dev.absmax[1]), (-10, 10));
        assert!(dev.absfuzz.iter().chain(dev.absflat.iter()).all(|&v| v == 0));
        assert_eq!(dev.ff_effects_max, 0);
    }

    #[test]
    fn overlong_name_is_truncated_not_rejected() {
        let identity = DeviceIdentity::new("y".repeat(300), 1, 2, 3);
        let dev = build(&identity, &AxisRanges::default());

        assert_eq!(dev.name().len(), UINPUT_MAX_NAME_SIZE - 1);
        assert_eq!(dev.name[UINPUT_MAX_NAME_SIZE - 1], 0);
    }
}
