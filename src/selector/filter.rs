use crate::constants::{CALLBACK_INFO, CALLBACK_INFO_RETURNABLE};
use crate::model::descriptor::{self, is_method_descriptor, DescriptorError};

/// Structural constraint on the descriptor of an inferred member.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DescriptorFilter {
    #[default]
    Any,
    /// Only methods.
    MethodOnly,
    /// Targets of an injection handler: the target's arguments must start
    /// with `leading_args` and its void-ness must equal `expect_void`.
    InjectHandler {
        leading_args: Vec<String>,
        expect_void: bool,
    },
}

impl DescriptorFilter {
    /// Builds the filter for an injection handler with the given
    /// callback-info parameter.
    pub fn for_handler(handler_desc: &str, callback: CallbackInfoParam) -> Result<Self, DescriptorError> {
        let args = descriptor::argument_types(handler_desc)?;
        Ok(Self::InjectHandler {
            leading_args: args.iter().take(callback.index).map(|a| (*a).to_owned()).collect(),
            expect_void: !callback.returnable,
        })
    }

    pub fn accepts(&self, desc: &str) -> bool {
        match self {
            Self::Any => true,
            Self::MethodOnly => is_method_descriptor(desc),
            Self::InjectHandler {
                leading_args,
                expect_void,
            } => {
                let Ok((args, ret)) = descriptor::split_method_descriptor(desc) else {
                    return false;
                };
                (ret == "V") == *expect_void
                    && args.len() >= leading_args.len()
                    && leading_args.iter().zip(&args).all(|(a, b)| a == b)
            }
        }
    }
}

/// Position and shape of a handler's callback-info parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallbackInfoParam {
    pub index: usize,
    /// `CallbackInfoReturnable`, i.e. the target returns a value.
    pub returnable: bool,
}

/// Finds the first callback-info parameter of a handler method.
pub fn find_callback_info(handler_desc: &str) -> Result<Option<CallbackInfoParam>, DescriptorError> {
    let args = descriptor::argument_types(handler_desc)?;
    Ok(args.iter().enumerate().find_map(|(index, arg)| {
        let class = arg.strip_prefix('L')?.strip_suffix(';')?;
        match class {
            CALLBACK_INFO => Some(CallbackInfoParam {
                index,
                returnable: false,
            }),
            CALLBACK_INFO_RETURNABLE => Some(CallbackInfoParam {
                index,
                returnable: true,
            }),
            _ => None,
        }
    }))
}
