//! Rendered content of the verification email

/// Subject line of every verification email
pub const VERIFICATION_SUBJECT: &str = "Joyful Registration Service - Verification Code";

/// Plain-text and HTML renditions of a verification email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationMessage {
    pub subject: String,
    pub text: String,
    pub html: String,
}

impl VerificationMessage {
    /// Render both bodies for `code`, valid for `expiry_minutes`
    pub fn render(code: &str, expiry_minutes: u64) -> Self {
        Self {
            subject: VERIFICATION_SUBJECT.to_string(),
            text: render_text(code, expiry_minutes),
            html: render_html(code, expiry_minutes),
        }
    }
}

fn render_text(code: &str, expiry_minutes: u64) -> String {
    format!(
        "You are registering for a Joyful platform account.\n\
         \n\
         Your verification code is: {code}\n\
         \n\
         This code will expire in {expiry_minutes} minutes.\n\
         Please do not share this code with anyone.\n\
         \n\
         If you did not request this verification, please ignore this email.\n\
         \n\
         Best regards,\n\
         Joyful Team"
    )
}

fn render_html(code: &str, expiry_minutes: u64) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>Joyful Registration Verification</title>
    <style>
        body {{ font-family: Arial, sans-serif; line-height: 1.6; color: #333; }}
        .container {{ max-width: 600px; margin: 0 auto; padding: 20px; }}
        .header {{ background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; padding: 20px; text-align: center; border-radius: 10px 10px 0 0; }}
        .content {{ background: #f9f9f9; padding: 30px; border-radius: 0 0 10px 10px; }}
        .code {{ background: #fff; border: 2px dashed #667eea; padding: 20px; text-align: center; margin: 20px 0; border-radius: 8px; }}
        .code-number {{ font-size: 32px; font-weight: bold; color: #667eea; letter-spacing: 8px; }}
        .footer {{ text-align: center; color: #666; margin-top: 20px; font-size: 14px; }}
        .warning {{ background: #fff3cd; border: 1px solid #ffeaa7; padding: 15px; border-radius: 5px; margin: 20px 0; }}
    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>Joyful Platform</h1>
            <h2>Registration Verification</h2>
        </div>
        <div class="content">
            <p>Hello!</p>
            <p>You are registering for a <strong>Joyful</strong> platform account.</p>
            <div class="code">
                <p>Your verification code is:</p>
                <div class="code-number">{code}</div>
            </div>
            <div class="warning">
                <p><strong>Important:</strong></p>
                <ul>
                    <li>This code will expire in <strong>{expiry_minutes} minutes</strong></li>
                    <li>Please do not share this code with anyone</li>
                    <li>If you did not request this verification, please ignore this email</li>
                </ul>
            </div>
            <p>Thank you for choosing Joyful!</p>
            <div class="footer">
                <p>Best regards,<br><strong>Joyful Team</strong></p>
                <p><small>This is an automated email. Please do not reply to this message.</small></p>
            </div>
        </div>
    </div>
</body>
</html>"#
    )
}
