
use std::fmt::{ self,
                Display,
                Formatter };



/// The two kinds of value a wafer script can hold.  Used for the error reporting when a value of
/// the wrong kind is popped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind
{
    Number,
    Text
}


impl ValueKind
{
    pub fn name(&self) -> &'static str
    {
        match self
        {
            ValueKind::Number => "number",
            ValueKind::Text   => "text"
        }
    }
}


impl Display for ValueKind
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result
    {
        write!(f, "{}", self.name())
    }
}



/// Core value enumeration used by the wafer interpreter.  Booleans are represented as numbers,
/// zero is false and anything else is true.
#[derive(Clone, Debug, PartialEq)]
pub enum Value
{
    /// A 64-bit floating point number.
    Number(f64),

    /// A string value, represented by a Rust string.
    Text(String)
}


/// Convert an arbitrary data type to a Value.
pub trait ToValue
{
    /// Implement to handle the actual conversion.
    fn to_value(&self) -> Value;
}


impl ToValue for f64
{
    fn to_value(&self) -> Value
    {
        Value::Number(*self)
    }
}


impl ToValue for usize
{
    fn to_value(&self) -> Value
    {
        Value::Number(*self as f64)
    }
}


/// Booleans become 1 for true and 0 for false.
impl ToValue for bool
{
    fn to_value(&self) -> Value
    {
        Value::Number(if *self { 1.0 } else { 0.0 })
    }
}


impl ToValue for String
{
    fn to_value(&self) -> Value
    {
        Value::Text(self.clone())
    }
}


impl ToValue for &str
{
    fn to_value(&self) -> Value
    {
        Value::Text(self.to_string())
    }
}


impl From<f64> for Value
{
    fn from(number: f64) -> Value
    {
        Value::Number(number)
    }
}


impl From<String> for Value
{
    fn from(text: String) -> Value
    {
        Value::Text(text)
    }
}


impl From<&str> for Value
{
    fn from(text: &str) -> Value
    {
        Value::Text(text.to_string())
    }
}


/// Render a number with the fewest digits that round trip.  Exponents below -4 or from 6 up
/// switch to exponent form with a signed, two digit exponent: `1e+06`, `2.5e-07`.  Infinities
/// print as `+Inf` and `-Inf`.
pub fn format_number(number: f64) -> String
{
    if number.is_nan()
    {
        return "NaN".to_string();
    }

    if number.is_infinite()
    {
        return if number > 0.0 { "+Inf".to_string() } else { "-Inf".to_string() };
    }

    if number == 0.0
    {
        return if number.is_sign_negative() { "-0".to_string() } else { "0".to_string() };
    }

    let scientific = format!("{:e}", number);

    let Some((mantissa, exponent)) = scientific.split_once('e')
    else
    {
        return number.to_string();
    };

    let Ok(exponent) = exponent.parse::<i32>()
    else
    {
        return number.to_string();
    };

    if exponent < -4 || exponent >= 6
    {
        let sign = if exponent < 0 { '-' } else { '+' };

        format!("{}e{}{:02}", mantissa, sign, exponent.abs())
    }
    else
    {
        number.to_string()
    }
}


/// Text prints as is.  Numbers print with `format_number`, so whole numbers print without a
/// fraction.
impl Display for Value
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result
    {
        match self
        {
            Value::Number(number) => write!(f, "{}", format_number(*number)),
            Value::Text(text)     => write!(f, "{}", text)
        }
    }
}


impl Value
{
    pub fn kind(&self) -> ValueKind
    {
        match self
        {
            Value::Number(_) => ValueKind::Number,
            Value::Text(_)   => ValueKind::Text
        }
    }

    /// The number held, if this is a number.
    pub fn as_number(&self) -> Option<f64>
    {
        match self
        {
            Value::Number(number) => Some(*number),
            Value::Text(_)        => None
        }
    }

    /// The boolean reading of a number, if this is a number.
    pub fn as_bool(&self) -> Option<bool>
    {
        self.as_number().map(|number| number != 0.0)
    }
}
